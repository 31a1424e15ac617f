// API request handlers
// Author: Gabriel Demetrios Lafis

use std::sync::Arc;

use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{info, warn};
use serde_json::json;

use crate::chat::AnalyticsBackend;
use crate::data::AnalyticsResult;
use crate::mapping::map_analytics;
use super::{ApiError, models::*};

/// Shared handler state
pub struct AppState {
    pub backend: Option<Arc<dyn AnalyticsBackend>>,
}

/// Health check
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Map an analytics payload supplied by the caller
pub async fn map_result(payload: web::Json<AnalyticsResult>) -> impl Responder {
    let result = payload.into_inner();
    let view = map_analytics(&result);

    HttpResponse::Ok().json(MapResponse::new(&result, view))
}

/// Run a query against the analytics backend and map its answer
pub async fn run_query(
    state: web::Data<AppState>,
    payload: web::Json<QueryRequest>,
) -> Result<impl Responder, ApiError> {
    let req = payload.into_inner();
    let text = req.query.trim();

    if text.is_empty() {
        return Err(ApiError::ValidationError("'query' cannot be empty".to_string()));
    }

    let backend = state.backend.as_ref().ok_or(ApiError::Unavailable)?;
    let result = backend.query(text).await?;

    info!("Answered analytics query (request {})", result.request_id);
    let view = map_analytics(&result);

    Ok(HttpResponse::Ok().json(MapResponse::new(&result, view)))
}

/// Report an unreadable JSON body in the same `{"detail"}` shape as other errors
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected body for {}: {}", req.path(), err);
    ApiError::ValidationError(err.to_string()).into()
}
