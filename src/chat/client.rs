// Analytics backend client
// Author: Gabriel Demetrios Lafis

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::{json, Value as JsonValue};
use thiserror::Error;

use crate::data::AnalyticsResult;

/// Path of the analytics endpoint, relative to the backend base URL
pub const ANALYTICS_QUERY_PATH: &str = "/api/v1/analytics/query";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Represents an error talking to the analytics backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// Message taken from the backend's `detail` member
    #[error("{0}")]
    Backend(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Turn an unsuccessful response body into an error
///
/// A string `detail` is used verbatim, any other `detail` is rendered as
/// JSON, and a missing or empty one falls back to the status code.
pub fn error_from_payload(status: u16, payload: &JsonValue) -> ClientError {
    match payload.get("detail") {
        Some(JsonValue::String(detail)) if !detail.is_empty() => ClientError::Backend(detail.clone()),
        Some(JsonValue::String(_)) | None => ClientError::Status(status),
        Some(detail) => ClientError::Backend(detail.to_string()),
    }
}

/// Anything that can answer a natural-language analytics query
#[async_trait]
pub trait AnalyticsBackend: Send + Sync {
    /// Run a query and return the backend's result
    async fn query(&self, text: &str) -> Result<AnalyticsResult, ClientError>;
}

/// HTTP client for the analytics backend
pub struct AnalyticsClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl AnalyticsClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(AnalyticsClient {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the analytics endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, ANALYTICS_QUERY_PATH)
    }
}

#[async_trait]
impl AnalyticsBackend for AnalyticsClient {
    async fn query(&self, text: &str) -> Result<AnalyticsResult, ClientError> {
        let url = self.endpoint();
        debug!("Posting analytics query to {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(&json!({ "query": text }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let payload: JsonValue = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            let err = error_from_payload(status.as_u16(), &payload);
            warn!("Analytics backend returned {}: {}", status.as_u16(), err);
            return Err(err);
        }

        Ok(AnalyticsResult::from_json(&payload))
    }
}
