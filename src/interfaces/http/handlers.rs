//! API route handlers

use super::error::ApiError;
use crate::application::AppState;
use crate::application::forecast_service::PredictionResponse;
use crate::domain::parking::ParkingSummary;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

pub async fn index() -> &'static str {
    "Motorcast vehicle forecast service"
}

pub async fn health() -> &'static str {
    "ok"
}

/// Request samples:
/// - `{"year": 2026}`
/// - `{"years": [2025, 2026, 2030]}`
/// - `{"start": 2025, "end": 2030}`
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictionResponse>, ApiError> {
    let started = Instant::now();
    let payload = parse_body(&body);
    debug!("Predict payload: {}", payload);

    let result = state.forecast.predict(&payload).map_err(ApiError::from);

    if let Some(metrics) = &state.metrics {
        let outcome = result.as_ref().map_or_else(ApiError::outcome, |_| "ok");
        metrics.inc_predict(outcome);
        metrics.observe_duration("predict", started.elapsed().as_secs_f64());
    }

    result.map(Json)
}

/// Body: `{"suburb": "..."}` or `{"lat": .., "lng": ..}`
pub async fn available_parking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ParkingSummary>, ApiError> {
    let started = Instant::now();
    let payload = parse_body(&body);
    debug!("Parking payload: {}", payload);

    let result = state
        .parking
        .availability_for_payload(&payload)
        .await
        .map_err(ApiError::from);

    if let Some(metrics) = &state.metrics {
        let outcome = result.as_ref().map_or_else(ApiError::outcome, |_| "ok");
        metrics.inc_parking(outcome);
        metrics.observe_duration("available_parking", started.elapsed().as_secs_f64());
    }

    result.map(Json)
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(metrics) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            metrics.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Unparseable bodies become `Null`, which the request parsers reject as malformed.
fn parse_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}
