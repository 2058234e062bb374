//! Route definitions for the AgriSense platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Active farmer and persona
        .route(
            "/farmer",
            get(handlers::get_current_farmer).put(handlers::switch_farmer),
        )
        .route("/farmers", get(handlers::list_farmers))
        .route("/farms/overview", get(handlers::get_farms_overview))
        .route(
            "/user-type",
            get(handlers::get_user_type).put(handlers::set_user_type),
        )
        .nest("/soil", soil_routes())
        .route("/trends", get(handlers::get_trend))
        .route(
            "/fertilizer-logs",
            get(handlers::list_fertilizer_logs).post(handlers::log_fertilizer_application),
        )
        .route("/fertilizer-logs/summary", get(handlers::get_fertilizer_summary))
        .route("/weather", get(handlers::get_current_weather))
        .route("/recommendations", get(handlers::get_recommendations))
        .route(
            "/recommendations/refresh",
            post(handlers::refresh_recommendation),
        )
        .nest("/reports", report_routes())
}

/// Soil reading routes
fn soil_routes() -> Router<AppState> {
    Router::new()
        .route("/latest", get(handlers::get_latest_reading))
        .route(
            "/readings",
            get(handlers::list_readings).post(handlers::record_reading),
        )
        .route("/health", get(handlers::get_soil_health))
        .route("/classify", get(handlers::classify_value))
        .route("/compare", get(handlers::compare_readings))
}

/// Export routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/readings.csv", get(handlers::export_readings_csv))
        .route("/fertilizer-logs.csv", get(handlers::export_fertilizer_logs_csv))
}
