//! HTTP API tests
//!
//! Exercises the router end to end with `tower::ServiceExt::oneshot`
//! against the seeded in-memory state.

use agrisense_backend::seed::{JUAN_DELA_CRUZ, MARIA_SANTOS};
use agrisense_backend::{create_app, AppState, Config};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> (Router, AppState) {
    let mut config = Config::default();
    // nothing listens here; refreshes fail fast
    config.prediction.base_url = "http://127.0.0.1:1".to_string();
    let state = AppState::seeded(config).unwrap();
    (create_app(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// Health and Farmer
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_switch_farmer() {
    let (app, _) = app();
    let (_, body) = send(&app, get("/api/v1/farmer")).await;
    assert_eq!(body["name"], "Juan Dela Cruz");

    let (status, body) = send(
        &app,
        with_json("PUT", "/api/v1/farmer", json!({ "farmer_id": MARIA_SANTOS })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["crop_type"], "Corn");

    let (_, body) = send(&app, get("/api/v1/farmer")).await;
    assert_eq!(body["name"], "Maria Santos");
}

#[tokio::test]
async fn test_switched_farmer_sees_only_own_readings() {
    let (app, _) = app();
    send(
        &app,
        with_json("PUT", "/api/v1/farmer", json!({ "farmer_id": MARIA_SANTOS })),
    )
    .await;

    // Maria has no readings yet, so nothing of Juan's leaks through
    let (status, _) = send(&app, get("/api/v1/soil/latest")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = send(&app, get("/api/v1/soil/readings")).await;
    assert!(body.as_array().unwrap().is_empty());
    let (_, body) = send(&app, get("/api/v1/trends?source=history")).await;
    assert!(body["points"].as_array().unwrap().is_empty());
    let (_, body) = send(&app, get("/api/v1/fertilizer-logs")).await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = send(&app, post("/api/v1/recommendations/refresh")).await;
    assert_eq!(body["request"]["nitrogen"], 15.0);
    assert_eq!(body["request"]["crop_type"], "Corn");

    let (status, body) = send(
        &app,
        with_json(
            "POST",
            "/api/v1/soil/readings",
            json!({
                "N": 20, "P": 25, "K": 180, "pH": 6.2,
                "moisture": 75, "EC": 1.2, "temperature": 28
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["farmer_id"], MARIA_SANTOS.to_string());

    let (_, body) = send(&app, post("/api/v1/recommendations/refresh")).await;
    assert_eq!(body["request"]["nitrogen"], 20.0);

    // switching back restores Juan's view
    send(
        &app,
        with_json("PUT", "/api/v1/farmer", json!({ "farmer_id": JUAN_DELA_CRUZ })),
    )
    .await;
    let (_, body) = send(&app, get("/api/v1/soil/latest")).await;
    assert_eq!(body["N"], 45.0);
}

#[tokio::test]
async fn test_switch_to_unknown_farmer() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        with_json(
            "PUT",
            "/api/v1/farmer",
            json!({ "farmer_id": "00000000-0000-0000-0000-0000000000ff" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_user_type_round_trip() {
    let (app, _) = app();
    let (_, body) = send(&app, get("/api/v1/user-type")).await;
    assert_eq!(body["user_type"], "farmer");

    let (_, body) = send(
        &app,
        with_json("PUT", "/api/v1/user-type", json!({ "user_type": "researcher" })),
    )
    .await;
    assert_eq!(body["user_type"], "researcher");

    let (_, body) = send(&app, get("/api/v1/user-type")).await;
    assert_eq!(body["user_type"], "researcher");
}

// ============================================================================
// Soil
// ============================================================================

#[tokio::test]
async fn test_latest_reading_and_health() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/v1/soil/latest")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["N"], 45.0);
    assert_eq!(body["timestamp"], "2025-08-17T08:00:00Z");

    let (_, body) = send(&app, get("/api/v1/soil/health")).await;
    assert_eq!(body["score"], 100.0);
    assert_eq!(body["tier"], "good");
    assert_eq!(body["nutrients"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_classify_endpoint() {
    let (app, _) = app();
    let (_, body) = send(&app, get("/api/v1/soil/classify?nutrient=Nitrogen&value=20")).await;
    assert_eq!(body["status"], "deficient");

    // raw field names are mapped to labels
    let (_, body) = send(&app, get("/api/v1/soil/classify?nutrient=pH&value=6.5")).await;
    assert_eq!(body["nutrient"], "pH Level");
    assert_eq!(body["status"], "healthy");

    let (_, body) = send(&app, get("/api/v1/soil/classify?nutrient=Sulfur&value=1")).await;
    assert_eq!(body["status"], "warning");
}

#[tokio::test]
async fn test_record_reading_becomes_latest() {
    let (app, state) = app();
    let (status, body) = send(
        &app,
        with_json(
            "POST",
            "/api/v1/soil/readings",
            json!({
                "N": 20, "P": 25, "K": 180, "pH": 6.2,
                "moisture": 75, "EC": 1.2, "temperature": 28
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["farmer_id"], JUAN_DELA_CRUZ.to_string());

    let (_, body) = send(&app, get("/api/v1/soil/latest")).await;
    assert_eq!(body["N"], 20.0);
    assert_eq!(state.dashboard.read().await.soil_readings.len(), 4);

    let (_, body) = send(&app, get("/api/v1/soil/health")).await;
    assert_eq!(body["nutrients"][0]["status"], "deficient");
}

#[tokio::test]
async fn test_backdated_reading_does_not_become_latest() {
    let (app, state) = app();
    let (status, _) = send(
        &app,
        with_json(
            "POST",
            "/api/v1/soil/readings",
            json!({
                "timestamp": "2020-01-01T00:00:00Z",
                "N": 5, "P": 25, "K": 180, "pH": 6.2, "moisture": 75, "EC": 1.2, "temperature": 28
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, get("/api/v1/soil/latest")).await;
    assert_eq!(body["N"], 45.0);
    assert_eq!(body["timestamp"], "2025-08-17T08:00:00Z");

    // the old reading is now the oldest one
    let (_, body) = send(&app, get("/api/v1/soil/readings")).await;
    assert_eq!(body.as_array().unwrap().len(), 4);
    assert_eq!(body[3]["N"], 5.0);
    let (_, body) = send(&app, get("/api/v1/soil/compare")).await;
    assert_eq!(body["changes"][0]["before"], 5.0);

    let (_, body) = send(&app, post("/api/v1/recommendations/refresh")).await;
    assert_eq!(body["request"]["nitrogen"], 45.0);
    assert_eq!(state.dashboard.read().await.soil_readings.len(), 4);
}

#[tokio::test]
async fn test_record_invalid_reading() {
    let (app, state) = app();
    let (status, body) = send(
        &app,
        with_json(
            "POST",
            "/api/v1/soil/readings",
            json!({
                "N": 45, "P": 25, "K": 180, "pH": 15.0,
                "moisture": 75, "EC": 1.2, "temperature": 28
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(state.dashboard.read().await.soil_readings.len(), 3);

    let (status, _) = send(
        &app,
        with_json(
            "POST",
            "/api/v1/soil/readings",
            json!({
                "N": 45, "P": 25, "K": 180, "pH": 6.2,
                "moisture": 75, "EC": 1.2, "temperature": 120
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compare_defaults_to_oldest_and_latest() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/v1/soil/compare")).await;
    assert_eq!(status, StatusCode::OK);
    let nitrogen = &body["changes"][0];
    assert_eq!(nitrogen["before"], 40.0);
    assert_eq!(nitrogen["after"], 45.0);
    assert_eq!(nitrogen["change"], 5.0);
}

// ============================================================================
// Trends, Logs, Weather, Reports
// ============================================================================

#[tokio::test]
async fn test_trend_endpoint() {
    let (app, _) = app();
    let (_, body) = send(&app, get("/api/v1/trends?days=14")).await;
    assert_eq!(body["source"], "synthetic");
    assert_eq!(body["points"].as_array().unwrap().len(), 14);

    let (_, body) = send(&app, get("/api/v1/trends?days=0")).await;
    assert_eq!(body["points"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, get("/api/v1/trends?source=history")).await;
    assert_eq!(body["source"], "history");
}

#[tokio::test]
async fn test_fertilizer_log_append() {
    let (app, _) = app();
    let (status, _) = send(
        &app,
        with_json(
            "POST",
            "/api/v1/fertilizer-logs",
            json!({
                "date_applied": "2025-08-17",
                "fertilizer_type": "Nano-Potassium",
                "amount": "12ml",
                "method": "Foliar Spray"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, get("/api/v1/fertilizer-logs")).await;
    let logs = body.as_array().unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[2]["fertilizer_type"], "Nano-Potassium");
}

#[tokio::test]
async fn test_fertilizer_logs_by_date() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/v1/fertilizer-logs?start_date=2025-08-05")).await;
    assert_eq!(status, StatusCode::OK);
    let logs = body.as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["fertilizer_type"], "Nano-Nitrogen");

    let (status, _) = send(
        &app,
        get("/api/v1/fertilizer-logs?start_date=2025-08-10&end_date=2025-08-01"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_fertilizer_summary() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/v1/fertilizer-logs/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_applications"], 2);
    assert_eq!(body["last_application"]["fertilizer_type"], "Nano-Nitrogen");

    let last = NaiveDate::from_ymd_opt(2025, 8, 10).unwrap();
    let expected = (Utc::now().date_naive() - last).num_days();
    assert_eq!(body["days_since_last_application"], expected);
}

#[tokio::test]
async fn test_fertilizer_log_rejects_bad_amount() {
    let (app, _) = app();
    let (status, _) = send(
        &app,
        with_json(
            "POST",
            "/api/v1/fertilizer-logs",
            json!({
                "date_applied": "2025-08-17",
                "fertilizer_type": "Nano-Potassium",
                "amount": "some",
                "method": "Foliar Spray"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weather_endpoint() {
    let (app, _) = app();
    let (_, body) = send(&app, get("/api/v1/weather")).await;
    assert_eq!(body["forecast"], "Partly cloudy");
    assert_eq!(body["condition"], "cloudy");
}

#[tokio::test]
async fn test_readings_csv_export() {
    let (app, _) = app();
    let response = app.oneshot(get("/api/v1/reports/readings.csv")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("id,farmer_id,timestamp,N,P,K,pH,moisture,EC,temperature"));
    assert_eq!(csv.lines().count(), 4);
}

// ============================================================================
// Researcher Overview
// ============================================================================

#[tokio::test]
async fn test_farms_overview() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/v1/farms/overview")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["farm_count"], 2);
    assert_eq!(body["farms"][0]["farmer"], "Juan Dela Cruz");
    assert_eq!(body["farms"][0]["score"], 100.0);
    assert_eq!(body["farms"][0]["tier"], "good");
    assert_eq!(body["farms"][1]["score"], Value::Null);
    assert_eq!(body["average_score"], 100.0);

    // a deficient-nitrogen reading for Maria pulls the average down
    send(
        &app,
        with_json("PUT", "/api/v1/farmer", json!({ "farmer_id": MARIA_SANTOS })),
    )
    .await;
    send(
        &app,
        with_json(
            "POST",
            "/api/v1/soil/readings",
            json!({
                "N": 20, "P": 25, "K": 180, "pH": 6.2,
                "moisture": 75, "EC": 1.2, "temperature": 28
            }),
        ),
    )
    .await;

    let (_, body) = send(&app, get("/api/v1/farms/overview")).await;
    let maria = body["farms"][1]["score"].as_f64().unwrap();
    assert!((maria - 600.0 / 7.0).abs() < 1e-9);
    assert_eq!(body["farms"][1]["tier"], "good");
    let average = body["average_score"].as_f64().unwrap();
    assert!((average - (100.0 + 600.0 / 7.0) / 2.0).abs() < 1e-9);
}

// ============================================================================
// Recommendations
// ============================================================================

#[tokio::test]
async fn test_recommendations_view() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/v1/recommendations")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loading"], false);
    assert_eq!(body["history"][0]["recommendation"], "Apply 12ml Nano-Nitrogen in 3 days");
}

#[tokio::test]
async fn test_refresh_failure_returns_ok_with_error() {
    let (app, _) = app();
    let (status, body) = send(&app, post("/api/v1/recommendations/refresh")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to get AI recommendation: "));
    assert_eq!(body["request"]["crop_type"], "Rice");
    assert_eq!(body["request"]["nitrogen"], 45.0);
}
