// Mapping of analytics results into renderable view-models
// Author: Gabriel Demetrios Lafis

mod chart;
mod table;

pub use chart::*;
pub use table::*;

use log::debug;
use serde::Serialize;

use crate::data::AnalyticsResult;

/// Supported chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Area,
}

impl ChartKind {
    /// Lowercase name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Area => "area",
        }
    }
}

/// A single category/value pair
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    pub secondary_value: Option<f64>,
}

/// Chart-ready projection of an analytics result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartModel {
    pub chart_type: ChartKind,
    pub title: String,
    pub x_axis_label: Option<String>,
    pub y_axis_label: Option<String>,
    pub points: Vec<ChartPoint>,
    pub primary_series_name: String,
    pub secondary_series_name: Option<String>,
}

/// Tabular preview of the result rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableModel {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Both projections of one analytics result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsView {
    pub chart: ChartModel,
    pub table: Option<TableModel>,
}

impl AnalyticsView {
    /// Whether the chart has anything to draw
    pub fn has_chart(&self) -> bool {
        !self.chart.points.is_empty()
    }
}

/// Map an analytics result into its chart and table projections
pub fn map_analytics(result: &AnalyticsResult) -> AnalyticsView {
    let chart = map_to_chart(result);
    let table = map_to_table(result);

    debug!(
        "Mapped request '{}': {} chart with {} points, table {}",
        result.request_id,
        chart.chart_type.as_str(),
        chart.points.len(),
        if table.is_some() { "present" } else { "absent" }
    );

    AnalyticsView { chart, table }
}
