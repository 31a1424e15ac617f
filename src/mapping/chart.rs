// Chart model resolution
// Author: Gabriel Demetrios Lafis

use crate::data::{
    to_number_safe, to_string_safe, AnalyticsQuery, AnalyticsResult, ChartSpec, Row, Value,
};
use super::{ChartKind, ChartModel, ChartPoint};

/// Title used when the result carries no summary
pub const DEFAULT_CHART_TITLE: &str = "Analytics Result";

/// Value field used when no hint names one
pub const DEFAULT_VALUE_FIELD: &str = "tickets";

/// Label for missing category values
pub const UNKNOWN_LABEL: &str = "unknown";

/// Separator between parts of a multi-field label
pub const LABEL_SEPARATOR: &str = " / ";

/// Row fields tried, in order, when no label field is known
const FALLBACK_LABEL_FIELDS: [&str; 3] = ["city", "ticket_type", "segment"];

/// Keywords tested against the combined chart hints, first match wins
const CHART_KIND_KEYWORDS: [(&str, ChartKind); 3] = [
    ("line", ChartKind::Line),
    ("pie", ChartKind::Pie),
    ("area", ChartKind::Area),
];

/// Resolve the chart kind from the query hint and the chart spec mark
///
/// Matching is by substring so that values such as `line-chart` or
/// `grouped-bar` resolve. Anything unrecognised is a bar chart.
pub fn resolve_chart_type(query: &AnalyticsQuery, spec: &ChartSpec) -> ChartKind {
    let hint = query
        .chart
        .as_ref()
        .and_then(|chart| chart.chart_type.as_ref());
    let hint = to_string_safe(hint, "").to_lowercase();
    let source = format!("{} {}", hint, spec.mark.normalized());

    CHART_KIND_KEYWORDS
        .iter()
        .find(|(keyword, _)| source.contains(*keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or(ChartKind::Bar)
}

/// Resolve the fields that label each point
///
/// Query dimensions take precedence; otherwise `encoding.x.field` is split on
/// commas. An empty list means labels come from the row content.
pub fn resolve_label_fields(query: &AnalyticsQuery, spec: &ChartSpec) -> Vec<String> {
    let dimensions: Vec<String> = query
        .dimensions
        .iter()
        .flatten()
        .map(|dim| to_string_safe(Some(dim), ""))
        .filter(|dim| !dim.is_empty())
        .collect();

    if !dimensions.is_empty() {
        return dimensions;
    }

    let x_field = to_string_safe(spec.encoding.x_field.as_ref(), "");
    x_field
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve the field holding each point's value
pub fn resolve_value_field(query: &AnalyticsQuery, spec: &ChartSpec) -> String {
    let candidates: [Option<&Value>; 3] = [
        query.chart.as_ref().and_then(|chart| chart.y.as_ref()),
        query.first_metric_alias(),
        spec.encoding.y_field.as_ref(),
    ];

    candidates
        .into_iter()
        .map(|candidate| to_string_safe(candidate, ""))
        .find(|field| !field.is_empty())
        .unwrap_or_else(|| DEFAULT_VALUE_FIELD.to_string())
}

/// Label for a row without a structured label field
fn fallback_label(row: &Row) -> String {
    FALLBACK_LABEL_FIELDS
        .iter()
        .filter_map(|field| row.get(field))
        .find(|value| value.is_truthy())
        .map(|value| value.to_string())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

/// Build one point per row, in row order
pub fn build_points(rows: &[Row], label_fields: &[String], value_field: &str) -> Vec<ChartPoint> {
    rows.iter()
        .map(|row| {
            let label = if label_fields.is_empty() {
                fallback_label(row)
            } else {
                label_fields
                    .iter()
                    .map(|field| to_string_safe(row.get(field), UNKNOWN_LABEL))
                    .collect::<Vec<_>>()
                    .join(LABEL_SEPARATOR)
            };

            ChartPoint {
                label,
                value: to_number_safe(row.get(value_field), 0.0),
                secondary_value: None,
            }
        })
        .collect()
}

/// Map an analytics result into a chart model
pub fn map_to_chart(result: &AnalyticsResult) -> ChartModel {
    let chart_type = resolve_chart_type(&result.query, &result.chart_spec);
    let label_fields = resolve_label_fields(&result.query, &result.chart_spec);
    let value_field = resolve_value_field(&result.query, &result.chart_spec);

    let points = build_points(&result.rows, &label_fields, &value_field);

    let title = if result.summary.is_empty() {
        DEFAULT_CHART_TITLE.to_string()
    } else {
        result.summary.clone()
    };

    let x_axis_label = if label_fields.is_empty() {
        None
    } else {
        Some(label_fields.join(", "))
    };

    ChartModel {
        chart_type,
        title,
        x_axis_label,
        y_axis_label: Some(value_field.clone()),
        points,
        primary_series_name: value_field,
        secondary_series_name: None,
    }
}
