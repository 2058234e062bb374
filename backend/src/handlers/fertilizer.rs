//! HTTP handlers for fertilizer logs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{ApplicationSummary, DateRange, FertilizerLogEntry, NewFertilizerLog};

use crate::error::{AppError, AppResult};
use crate::services::FertilizerService;
use crate::AppState;

/// Query parameters for fertilizer logs by application date
#[derive(Debug, Deserialize)]
pub struct LogDateQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl LogDateQuery {
    fn range(&self) -> AppResult<Option<DateRange>> {
        let range = match (self.start_date, self.end_date) {
            (None, None) => return Ok(None),
            (start, end) => DateRange {
                start: start.unwrap_or(NaiveDate::MIN),
                end: end.unwrap_or(NaiveDate::MAX),
            },
        };
        if range.start > range.end {
            return Err(AppError::ValidationError(
                "start_date must not be after end_date".to_string(),
            ));
        }
        Ok(Some(range))
    }
}

/// List fertilizer applications in entry order
pub async fn list_fertilizer_logs(
    State(state): State<AppState>,
    Query(query): Query<LogDateQuery>,
) -> AppResult<Json<Vec<FertilizerLogEntry>>> {
    let range = query.range()?;
    let service = FertilizerService::new(state.dashboard);
    Ok(Json(service.list_logs(range.as_ref()).await))
}

/// Application count and days since the last application
pub async fn get_fertilizer_summary(State(state): State<AppState>) -> Json<ApplicationSummary> {
    let service = FertilizerService::new(state.dashboard);
    Json(service.summary().await)
}

/// Log a fertilizer application
pub async fn log_fertilizer_application(
    State(state): State<AppState>,
    Json(input): Json<NewFertilizerLog>,
) -> AppResult<(StatusCode, Json<FertilizerLogEntry>)> {
    let service = FertilizerService::new(state.dashboard);
    let entry = service.log_application(input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
