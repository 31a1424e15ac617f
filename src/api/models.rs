// API request and response models
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};

use crate::data::AnalyticsResult;
use crate::mapping::{AnalyticsView, ChartModel, TableModel};

/// Request to run a natural-language analytics query
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Mapped analytics result
#[derive(Debug, Clone, Serialize)]
pub struct MapResponse {
    pub request_id: String,
    pub summary: String,
    pub sql: String,
    pub chart: ChartModel,
    pub table: Option<TableModel>,
}

impl MapResponse {
    /// Assemble a response from a result and its view
    pub fn new(result: &AnalyticsResult, view: AnalyticsView) -> Self {
        MapResponse {
            request_id: result.request_id.clone(),
            summary: result.summary.clone(),
            sql: result.sql.clone(),
            chart: view.chart,
            table: view.table,
        }
    }
}
