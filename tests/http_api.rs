use anyhow::anyhow;
use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use motorcast::application::AppState;
use motorcast::application::forecast_service::ForecastContext;
use motorcast::domain::forecasting::TrendModel;
use motorcast::domain::parking::{ParkingQuery, StreetAvailability};
use motorcast::domain::repositories::ParkingRepository;
use motorcast::domain::request::YearBounds;
use motorcast::infrastructure::observability::Metrics;
use motorcast::infrastructure::repositories::in_memory::ParkingSpot;
use motorcast::infrastructure::InMemoryParkingRepository;
use motorcast::interfaces::http::router;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

struct FailingRepository;

#[async_trait]
impl ParkingRepository for FailingRepository {
    async fn street_availability(
        &self,
        _query: &ParkingQuery,
    ) -> anyhow::Result<Vec<StreetAvailability>> {
        Err(anyhow!("connection refused"))
    }
}

fn spot(street: &str, suburb: &str, lat: f64, lng: f64, free: bool) -> ParkingSpot {
    ParkingSpot {
        street: street.to_string(),
        suburb: suburb.to_string(),
        latitude: lat,
        longitude: lng,
        is_available: free,
    }
}

fn forecast() -> Arc<ForecastContext> {
    // Flat 1M people: ratio is 0.212983, vehicles 212983 for every year
    Arc::new(
        ForecastContext::with_reference_window(
            TrendModel::from_parameters(0.0, 1_000_000.0),
            YearBounds::default(),
        )
        .unwrap(),
    )
}

fn state_with(repo: Arc<dyn ParkingRepository>, metrics: Option<Metrics>) -> AppState {
    AppState::new(forecast(), repo, metrics)
}

fn state() -> AppState {
    let repo = InMemoryParkingRepository::with_spots(vec![
        spot("Lygon St", "Carlton", -37.7990, 144.9670, true),
        spot("Lygon St", "Carlton", -37.7995, 144.9671, false),
        spot("Drummond St", "Carlton", -37.8000, 144.9680, true),
        spot("Chapel St", "Prahran", -37.8500, 144.9930, true),
    ]);
    state_with(Arc::new(repo), Some(Metrics::new().unwrap()))
}

async fn post_json(state: AppState, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_text(state: AppState, uri: &str) -> (StatusCode, String) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_text(state(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_predict_single_year() {
    let (status, body) = post_json(state(), "/api/predict", json!({"year": 2030}).to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let avg = body["avgVehiclePerPerson"].as_f64().unwrap();
    assert!((avg - 0.212983).abs() < 1e-12);
    assert_eq!(
        body["items"],
        json!([{"Year": 2030, "PredictedPopulation": 1000000, "PredictedVehicles": 212983}])
    );
}

#[tokio::test]
async fn test_predict_range_is_ordered() {
    let (status, body) =
        post_json(state(), "/api/predict", json!({"start": 2025, "end": 2028}).to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let years: Vec<i64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["Year"].as_i64().unwrap())
        .collect();
    assert_eq!(years, vec![2025, 2026, 2027, 2028]);
}

#[tokio::test]
async fn test_predict_client_errors() {
    let (status, body) =
        post_json(state(), "/api/predict", json!({"years": [2050, 1999]}).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Year out of range: 1999 (allowed 2000..=2100)");

    let (status, body) = post_json(state(), "/api/predict", json!({}).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Provide 'year', 'years', or ('start' and 'end').");

    let (status, body) = post_json(state(), "/api/predict", json!({"years": []}).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "'years' must be a non-empty list");

    let (status, body) =
        post_json(state(), "/api/predict", json!({"start": 2030, "end": 2020}).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "'start' must be <= 'end'");
}

#[tokio::test]
async fn test_predict_unparseable_body() {
    let (status, body) = post_json(state(), "/api/predict", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_parking_by_suburb() {
    let (status, body) = post_json(
        state(),
        "/api/available-parking",
        json!({"suburb": "Carlton"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_spots"], 3);
    assert_eq!(body["available_spots"], 2);
    assert_eq!(body["distribution"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_parking_by_coordinates() {
    // Prahran is ~6km away from this point and falls outside the radius
    let (status, body) = post_json(
        state(),
        "/api/available-parking",
        json!({"lat": -37.7992, "lng": 144.9672}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_spots"], 3);
}

#[tokio::test]
async fn test_parking_missing_location() {
    let (status, body) =
        post_json(state(), "/api/available-parking", json!({"lat": -37.8}).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing location data");
}

#[tokio::test]
async fn test_parking_database_failure_is_server_error() {
    let state = state_with(Arc::new(FailingRepository), None);
    let (status, body) =
        post_json(state, "/api/available-parking", json!({"suburb": "Carlton"}).to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_metrics_exposition() {
    let state = state();
    post_json(state.clone(), "/api/predict", json!({"year": 2030}).to_string()).await;
    post_json(state.clone(), "/api/predict", json!({"year": 3000}).to_string()).await;

    let (status, body) = get_text(state, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("motorcast_avg_vehicle_per_person 0.212983"));
    assert!(body.contains("motorcast_predict_requests_total{outcome=\"ok\"} 1"));
    assert!(body.contains("motorcast_predict_requests_total{outcome=\"client_error\"} 1"));
}

#[tokio::test]
async fn test_metrics_disabled() {
    let state = state_with(Arc::new(InMemoryParkingRepository::new()), None);
    let (status, _) = get_text(state, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
