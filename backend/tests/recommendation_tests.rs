//! Recommendation tests
//!
//! Tests for the prediction client and refresh flow against a local stub
//! prediction service:
//! - Request body assembled from the latest reading
//! - Non-success status with body text
//! - Malformed response JSON
//! - Transport failure

use std::sync::{Arc, Mutex};

use agrisense_backend::external::PredictionClient;
use agrisense_backend::seed;
use agrisense_backend::services::recommendation::{RecommendationService, RecommendationTracker};
use agrisense_backend::services::FarmerService;
use agrisense_backend::{AppState, Config};
use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::json;
use shared::{
    build_request, ConfidenceLevel, DashboardState, RecommendationRequest, RequestDefaults,
};
use tokio::sync::RwLock;

/// Serve `router` on an ephemeral local port and return its base URL
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn success_stub(captured: Arc<Mutex<Vec<RecommendationRequest>>>) -> Router {
    Router::new().route(
        "/predict",
        post(move |Json(request): Json<RecommendationRequest>| {
            let captured = captured.clone();
            async move {
                captured.lock().unwrap().push(request);
                Json(json!({
                    "predicted_fertilizer": "Urea",
                    "fertilizer_code": 6,
                    "confidence": 0.87,
                    "timestamp": "2025-08-17T09:00:00",
                    "recommendations": ["Apply in the early morning", "Split into two doses"]
                }))
            }
        }),
    )
}

fn failing_stub() -> Router {
    Router::new().route(
        "/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded") }),
    )
}

fn malformed_stub() -> Router {
    Router::new().route("/predict", post(|| async { "not json" }))
}

fn service_for(base_url: &str, dashboard: DashboardState) -> RecommendationService {
    RecommendationService::new(
        Arc::new(RwLock::new(dashboard)),
        Arc::new(RwLock::new(RecommendationTracker::new())),
        PredictionClient::new(base_url, None).unwrap(),
        RequestDefaults::default(),
    )
}

// ============================================================================
// Prediction Client
// ============================================================================

#[tokio::test]
async fn test_client_parses_success_response() {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let base_url = spawn_stub(success_stub(captured.clone())).await;
    let client = PredictionClient::new(base_url, None).unwrap();

    let request = build_request(&seed::soil_readings(), Some("Rice"), &RequestDefaults::default());
    let response = tokio_test::assert_ok!(client.predict(&request).await);

    assert_eq!(response.predicted_fertilizer, "Urea");
    assert_eq!(response.confidence_level(), ConfidenceLevel::High);
    assert_eq!(response.recommendations.len(), 2);
    assert_eq!(captured.lock().unwrap()[0], request);
}

#[tokio::test]
async fn test_client_surfaces_error_body() {
    let base_url = spawn_stub(failing_stub()).await;
    let client = PredictionClient::new(base_url, None).unwrap();

    let request = build_request(&[], None, &RequestDefaults::default());
    let err = client.predict(&request).await.unwrap_err().to_string();
    assert!(err.contains("500"), "{}", err);
    assert!(err.contains("model not loaded"), "{}", err);
}

#[tokio::test]
async fn test_client_rejects_malformed_json() {
    let base_url = spawn_stub(malformed_stub()).await;
    let client = PredictionClient::new(base_url, None).unwrap();

    let request = build_request(&[], None, &RequestDefaults::default());
    let err = client.predict(&request).await.unwrap_err().to_string();
    assert!(err.contains("Failed to parse response"), "{}", err);
}

// ============================================================================
// Refresh Flow
// ============================================================================

#[tokio::test]
async fn test_refresh_sends_latest_reading_and_stores_result() {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let base_url = spawn_stub(success_stub(captured.clone())).await;
    let service = service_for(&base_url, seed::dashboard_state());

    let view = service.refresh().await;

    assert!(!view.loading);
    assert!(view.error.is_none());
    assert_eq!(view.response.as_ref().unwrap().predicted_fertilizer, "Urea");

    let sent = captured.lock().unwrap()[0].clone();
    assert_eq!(sent.nitrogen, 45.0);
    assert_eq!(sent.phosphorus, 25.0);
    assert_eq!(sent.potassium, 180.0);
    assert_eq!(sent.temperature, 28.0);
    assert_eq!(sent.moisture, 75.0);
    assert_eq!(sent.humidity, 65.0);
    assert_eq!(sent.soil_type, "Loamy");
    assert_eq!(sent.crop_type, "Rice");

    // seeded recommendation plus the new one
    assert_eq!(view.history.len(), 2);
    assert_eq!(view.history[1].recommendation, "Urea");
    assert_eq!(
        view.history[1].notes.as_deref(),
        Some("Apply in the early morning Split into two doses")
    );
}

#[tokio::test]
async fn test_refresh_after_farmer_switch_uses_that_farmer() {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let base_url = spawn_stub(success_stub(captured.clone())).await;
    let dashboard = Arc::new(RwLock::new(seed::dashboard_state()));
    let service = RecommendationService::new(
        dashboard.clone(),
        Arc::new(RwLock::new(RecommendationTracker::new())),
        PredictionClient::new(base_url, None).unwrap(),
        RequestDefaults::default(),
    );

    FarmerService::new(dashboard.clone())
        .switch_farmer(seed::MARIA_SANTOS)
        .await
        .unwrap();
    let view = service.refresh().await;

    // none of Juan's readings are sent on Maria's behalf
    let sent = captured.lock().unwrap()[0].clone();
    let mut expected = build_request(&[], None, &RequestDefaults::default());
    expected.crop_type = "Corn".to_string();
    assert_eq!(sent, expected);

    // stored under Maria, and Juan's seeded history stays his
    assert_eq!(view.history.len(), 1);
    assert_eq!(view.history[0].farmer_id, seed::MARIA_SANTOS);
    let state = dashboard.read().await;
    let juan = state
        .recommendations
        .iter()
        .filter(|r| r.farmer_id == seed::JUAN_DELA_CRUZ)
        .count();
    assert_eq!(juan, 1);
}

#[tokio::test]
async fn test_refresh_with_empty_state_uses_defaults() {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let base_url = spawn_stub(success_stub(captured.clone())).await;
    let service = service_for(&base_url, DashboardState::default());

    service.refresh().await;

    let sent = captured.lock().unwrap()[0].clone();
    assert_eq!(sent, build_request(&[], None, &RequestDefaults::default()));
    assert_eq!(sent.crop_type, "Rice");
}

#[tokio::test]
async fn test_refresh_failure_is_reported_in_view() {
    let base_url = spawn_stub(failing_stub()).await;
    let service = service_for(&base_url, seed::dashboard_state());

    let view = service.refresh().await;

    assert!(!view.loading);
    assert!(view.response.is_none());
    let error = view.error.unwrap();
    assert!(error.starts_with("Failed to get AI recommendation: "), "{}", error);
    assert!(error.contains("model not loaded"), "{}", error);
}

#[tokio::test]
async fn test_refresh_transport_failure() {
    // nothing listens on port 1
    let service = service_for("http://127.0.0.1:1", seed::dashboard_state());
    let view = service.refresh().await;
    let error = view.error.unwrap();
    assert!(error.starts_with("Failed to get AI recommendation: Request failed"), "{}", error);
}

#[tokio::test]
async fn test_manual_retry_clears_error() {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let failing = spawn_stub(failing_stub()).await;
    let working = spawn_stub(success_stub(captured)).await;

    let dashboard = Arc::new(RwLock::new(seed::dashboard_state()));
    let tracker = Arc::new(RwLock::new(RecommendationTracker::new()));

    let first = RecommendationService::new(
        dashboard.clone(),
        tracker.clone(),
        PredictionClient::new(failing, None).unwrap(),
        RequestDefaults::default(),
    );
    assert!(first.refresh().await.error.is_some());

    let retry = RecommendationService::new(
        dashboard,
        tracker,
        PredictionClient::new(working, None).unwrap(),
        RequestDefaults::default(),
    );
    let view = retry.refresh().await;
    assert!(view.error.is_none());
    assert!(view.response.is_some());
}

#[tokio::test]
async fn test_app_state_builds_client_from_config() {
    let mut config = Config::default();
    config.prediction.base_url = "http://127.0.0.1:9000/".to_string();
    config.prediction.timeout_secs = Some(5);
    let state = AppState::seeded(config).unwrap();
    assert_eq!(state.prediction.predict_url(), "http://127.0.0.1:9000/predict");
}
