//! Prometheus metrics definitions for Motorcast
//!
//! All metrics use the `motorcast_` prefix.

use prometheus::{
    CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Forecast requests by outcome (ok, client_error, server_error)
    pub predict_requests_total: CounterVec,
    /// Parking lookups by outcome
    pub parking_requests_total: CounterVec,
    /// Handler latency in seconds
    pub request_duration_seconds: HistogramVec,
    /// Vehicles-per-person ratio in use
    pub avg_vehicle_per_person: GenericGauge<AtomicF64>,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let predict_requests_total = CounterVec::new(
            Opts::new(
                "motorcast_predict_requests_total",
                "Forecast requests by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(predict_requests_total.clone()))?;

        let parking_requests_total = CounterVec::new(
            Opts::new(
                "motorcast_parking_requests_total",
                "Parking availability requests by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(parking_requests_total.clone()))?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "motorcast_request_duration_seconds",
                "Handler latency in seconds",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5]),
            &["endpoint"],
        )?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        let avg_vehicle_per_person = Gauge::with_opts(Opts::new(
            "motorcast_avg_vehicle_per_person",
            "Average vehicles-per-person ratio used for forecasts",
        ))?;
        registry.register(Box::new(avg_vehicle_per_person.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            predict_requests_total,
            parking_requests_total,
            request_duration_seconds,
            avg_vehicle_per_person,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn inc_predict(&self, outcome: &str) {
        self.predict_requests_total
            .with_label_values(&[outcome])
            .inc();
    }

    pub fn inc_parking(&self, outcome: &str) {
        self.parking_requests_total
            .with_label_values(&[outcome])
            .inc();
    }

    pub fn observe_duration(&self, endpoint: &str, seconds: f64) {
        self.request_duration_seconds
            .with_label_values(&[endpoint])
            .observe(seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        assert!(metrics.render().contains("motorcast_avg_vehicle_per_person"));
    }

    #[test]
    fn test_counters_render_with_labels() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.inc_predict("ok");
        metrics.inc_predict("ok");
        metrics.inc_parking("client_error");
        let output = metrics.render();
        assert!(output.contains("motorcast_predict_requests_total{outcome=\"ok\"} 2"));
        assert!(output.contains("motorcast_parking_requests_total{outcome=\"client_error\"} 1"));
    }

    #[test]
    fn test_ratio_gauge() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.avg_vehicle_per_person.set(0.5);
        assert!(metrics.render().contains("motorcast_avg_vehicle_per_person 0.5"));
    }
}
