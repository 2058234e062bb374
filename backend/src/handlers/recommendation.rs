//! HTTP handlers for AI fertilizer recommendations

use axum::{extract::State, Json};

use crate::services::recommendation::{RecommendationService, RecommendationView};
use crate::AppState;

fn service(state: AppState) -> RecommendationService {
    RecommendationService::new(
        state.dashboard,
        state.tracker,
        state.prediction,
        state.config.recommendation.clone(),
    )
}

/// Current recommendation panel state
pub async fn get_recommendations(State(state): State<AppState>) -> Json<RecommendationView> {
    Json(service(state).view().await)
}

/// Request a fresh recommendation. Service failures are reported in the body.
pub async fn refresh_recommendation(State(state): State<AppState>) -> Json<RecommendationView> {
    Json(service(state).refresh().await)
}
