//! AgriSense soil monitoring platform - backend library
//!
//! Serves the dashboard data for soil readings, trends, fertilizer logs and
//! AI fertilizer recommendations.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::{DashboardState, ThresholdTable, WeatherSnapshot};
use tokio::sync::RwLock;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod seed;
pub mod services;

pub use config::Config;

use error::AppResult;
use external::PredictionClient;
use services::{RecommendationTracker, SharedDashboard};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dashboard: SharedDashboard,
    pub tracker: Arc<RwLock<RecommendationTracker>>,
    pub prediction: PredictionClient,
    pub thresholds: Arc<ThresholdTable>,
    pub weather: WeatherSnapshot,
}

impl AppState {
    pub fn new(
        config: Config,
        dashboard: DashboardState,
        weather: WeatherSnapshot,
    ) -> AppResult<Self> {
        let prediction = PredictionClient::from_config(&config.prediction)?;
        Ok(Self {
            config: Arc::new(config),
            dashboard: Arc::new(RwLock::new(dashboard)),
            tracker: Arc::new(RwLock::new(RecommendationTracker::new())),
            prediction,
            thresholds: Arc::new(ThresholdTable::standard()),
            weather,
        })
    }

    /// State preloaded with the demo farmers, readings and logs
    pub fn seeded(config: Config) -> AppResult<Self> {
        Self::new(config, seed::dashboard_state(), seed::weather())
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AgriSense Soil Monitoring API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
