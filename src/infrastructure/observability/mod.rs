//! Observability for Motorcast
//!
//! Metrics are kept in a Prometheus registry and exposed as text on
//! `GET /metrics`. Logs go through `tracing`.

pub mod metrics;

pub use metrics::Metrics;
