//! HTTP handlers for the researcher dashboard

use axum::{extract::State, Json};
use shared::FarmsOverview;

use crate::services::ResearchService;
use crate::AppState;

/// Latest soil health of every farm plus the cross-farm average
pub async fn get_farms_overview(State(state): State<AppState>) -> Json<FarmsOverview> {
    let service = ResearchService::new(state.dashboard, state.thresholds);
    Json(service.farms_overview().await)
}
