//! Fertilizer application log service

use chrono::{NaiveDate, Utc};
use shared::{
    validate_fertilizer_log, Action, ApplicationSummary, DateRange, FertilizerLogEntry,
    NewFertilizerLog,
};
use validator::Validate;

use super::{dispatch, SharedDashboard};
use crate::error::{AppError, AppResult};

/// Service for the append-only fertilizer log
#[derive(Clone)]
pub struct FertilizerService {
    dashboard: SharedDashboard,
}

impl FertilizerService {
    pub fn new(dashboard: SharedDashboard) -> Self {
        Self { dashboard }
    }

    /// The current farmer's entries in the order they were logged,
    /// optionally limited to an application date range
    pub async fn list_logs(&self, range: Option<&DateRange>) -> Vec<FertilizerLogEntry> {
        self.dashboard
            .read()
            .await
            .current_fertilizer_logs()
            .filter(|log| range.map_or(true, |r| r.contains(log.date_applied)))
            .cloned()
            .collect()
    }

    pub async fn summary(&self) -> ApplicationSummary {
        self.summary_on(Utc::now().date_naive()).await
    }

    /// Count and recency of the current farmer's applications as of `today`
    pub async fn summary_on(&self, today: NaiveDate) -> ApplicationSummary {
        let logs = self.list_logs(None).await;
        ApplicationSummary::from_logs(&logs, today)
    }

    pub async fn log_application(&self, input: NewFertilizerLog) -> AppResult<FertilizerLogEntry> {
        input.validate().map_err(AppError::from_validation)?;

        let now = Utc::now();
        validate_fertilizer_log(&input, now.date_naive())
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let default_farmer = self
            .dashboard
            .read()
            .await
            .current_farmer_id()
            .ok_or_else(|| AppError::NotFound("Current farmer".to_string()))?;

        let entry = input.into_entry(default_farmer, now);
        dispatch(&self.dashboard, Action::AddFertilizerLog(entry.clone())).await;

        tracing::info!(
            log_id = %entry.id,
            fertilizer = %entry.fertilizer_type,
            amount = %entry.amount,
            "Logged fertilizer application"
        );
        Ok(entry)
    }
}
