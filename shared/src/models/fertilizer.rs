//! Fertilizer application log models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A past fertilizer application. Entries are appended, never edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FertilizerLogEntry {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub date_applied: NaiveDate,
    pub fertilizer_type: String,
    /// Free-form quantity as entered, e.g. "15ml"
    pub amount: String,
    pub method: String,
    pub logged_at: DateTime<Utc>,
}

/// Input for logging a fertilizer application
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewFertilizerLog {
    pub farmer_id: Option<Uuid>,
    pub date_applied: NaiveDate,
    #[validate(length(min = 1, max = 100))]
    pub fertilizer_type: String,
    #[validate(length(min = 1, max = 50))]
    pub amount: String,
    #[validate(length(min = 1, max = 100))]
    pub method: String,
}

impl NewFertilizerLog {
    pub fn into_entry(self, default_farmer: Uuid, now: DateTime<Utc>) -> FertilizerLogEntry {
        FertilizerLogEntry {
            id: Uuid::new_v4(),
            farmer_id: self.farmer_id.unwrap_or(default_farmer),
            date_applied: self.date_applied,
            fertilizer_type: self.fertilizer_type.trim().to_string(),
            amount: self.amount.trim().to_string(),
            method: self.method.trim().to_string(),
            logged_at: now,
        }
    }
}

/// Most recent application by date applied
pub fn last_application(logs: &[FertilizerLogEntry]) -> Option<&FertilizerLogEntry> {
    logs.iter().max_by_key(|log| (log.date_applied, log.logged_at))
}

/// Whole days between the last application and `today`
pub fn days_since_last_application(
    logs: &[FertilizerLogEntry],
    today: NaiveDate,
) -> Option<i64> {
    last_application(logs).map(|log| (today - log.date_applied).num_days())
}

/// Application count and recency of a fertilizer log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationSummary {
    pub total_applications: usize,
    pub last_application: Option<FertilizerLogEntry>,
    pub days_since_last_application: Option<i64>,
}

impl ApplicationSummary {
    pub fn from_logs(logs: &[FertilizerLogEntry], today: NaiveDate) -> Self {
        Self {
            total_applications: logs.len(),
            last_application: last_application(logs).cloned(),
            days_since_last_application: days_since_last_application(logs, today),
        }
    }
}
