//! JSON-over-HTTP surface.

pub mod error;
pub mod handlers;

use crate::application::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build the application router. Browsers on any origin may call the API.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/predict", post(handlers::predict))
        .route("/api/available-parking", post(handlers::available_parking))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
