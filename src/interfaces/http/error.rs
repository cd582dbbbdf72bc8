use crate::domain::errors::{ForecastError, ParkingError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

/// Maps domain faults to `{"error": ...}` with 400 for client faults and
/// 500 for everything else.
#[derive(Debug)]
pub enum ApiError {
    Forecast(ForecastError),
    Parking(ParkingError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        let client_fault = match self {
            ApiError::Forecast(e) => e.is_client_fault(),
            ApiError::Parking(e) => e.is_client_fault(),
        };
        if client_fault {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Label used for request outcome metrics
    pub fn outcome(&self) -> &'static str {
        if self.status().is_client_error() {
            "client_error"
        } else {
            "server_error"
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Forecast(e) => e.to_string(),
            ApiError::Parking(e) => e.to_string(),
        }
    }
}

impl From<ForecastError> for ApiError {
    fn from(e: ForecastError) -> Self {
        ApiError::Forecast(e)
    }
}

impl From<ParkingError> for ApiError {
    fn from(e: ParkingError) -> Self {
        ApiError::Parking(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!("Request failed: {}", message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
