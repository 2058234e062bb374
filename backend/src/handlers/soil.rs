//! HTTP handlers for soil readings

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{NewSoilReading, ReadingComparison, SoilHealthReport, SoilReading};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::soil::{Classification, SoilService};
use crate::AppState;

fn service(state: AppState) -> SoilService {
    SoilService::new(state.dashboard, state.thresholds)
}

/// Get the latest soil reading
pub async fn get_latest_reading(State(state): State<AppState>) -> AppResult<Json<SoilReading>> {
    let reading = service(state).latest_reading().await?;
    Ok(Json(reading))
}

/// List soil readings, newest first
pub async fn list_readings(State(state): State<AppState>) -> Json<Vec<SoilReading>> {
    Json(service(state).list_readings().await)
}

/// Record a new soil reading
pub async fn record_reading(
    State(state): State<AppState>,
    Json(input): Json<NewSoilReading>,
) -> AppResult<(StatusCode, Json<SoilReading>)> {
    let reading = service(state).record_reading(input).await?;
    Ok((StatusCode::CREATED, Json(reading)))
}

/// Health report for the latest reading
pub async fn get_soil_health(State(state): State<AppState>) -> AppResult<Json<SoilHealthReport>> {
    let report = service(state).health_report().await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub nutrient: String,
    pub value: f64,
}

/// Classify a single value
pub async fn classify_value(
    State(state): State<AppState>,
    Query(query): Query<ClassifyQuery>,
) -> Json<Classification> {
    Json(service(state).classify(&query.nutrient, query.value))
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub before: Option<Uuid>,
    pub after: Option<Uuid>,
}

/// Before/after comparison of two readings
pub async fn compare_readings(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> AppResult<Json<ReadingComparison>> {
    let comparison = service(state).compare(query.before, query.after).await?;
    Ok(Json(comparison))
}
