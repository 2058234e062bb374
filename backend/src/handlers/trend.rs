//! HTTP handlers for trend series

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::services::trend::{TrendSeries, TrendService, TrendSourceKind};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub days: Option<usize>,
    #[serde(default)]
    pub source: TrendSourceKind,
}

/// Get a trend series ending today
pub async fn get_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Json<TrendSeries> {
    let service = TrendService::new(state.dashboard, state.config.trend.clone());
    Json(service.trend(query.days, query.source).await)
}
