//! Soil reading service: latest values, classification, health reports

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use shared::{
    validate_soil_reading, Action, HealthStatus, NewSoilReading, NutrientKind, ReadingComparison,
    SoilHealthReport, SoilReading, ThresholdTable,
};
use uuid::Uuid;
use validator::Validate;

use super::{dispatch, SharedDashboard};
use crate::error::{AppError, AppResult};

/// Service for soil readings and their classification
#[derive(Clone)]
pub struct SoilService {
    dashboard: SharedDashboard,
    thresholds: Arc<ThresholdTable>,
}

/// Classification of a single value
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub nutrient: String,
    pub value: f64,
    pub status: HealthStatus,
}

impl SoilService {
    pub fn new(dashboard: SharedDashboard, thresholds: Arc<ThresholdTable>) -> Self {
        Self {
            dashboard,
            thresholds,
        }
    }

    pub async fn latest_reading(&self) -> AppResult<SoilReading> {
        self.dashboard
            .read()
            .await
            .latest_reading()
            .cloned()
            .ok_or_else(|| AppError::NotFound("Soil reading".to_string()))
    }

    /// Readings of the current farmer, newest first
    pub async fn list_readings(&self) -> Vec<SoilReading> {
        self.dashboard.read().await.current_readings().cloned().collect()
    }

    /// Validate and record a new reading in timestamp order
    pub async fn record_reading(&self, input: NewSoilReading) -> AppResult<SoilReading> {
        input.validate().map_err(AppError::from_validation)?;
        validate_soil_reading(&input).map_err(|e| AppError::ValidationError(e.to_string()))?;

        let default_farmer = self
            .dashboard
            .read()
            .await
            .current_farmer_id()
            .ok_or_else(|| AppError::NotFound("Current farmer".to_string()))?;

        let reading = input.into_reading(default_farmer, Utc::now());
        dispatch(&self.dashboard, Action::RecordSoilReading(reading.clone())).await;

        tracing::info!(
            reading_id = %reading.id,
            farmer_id = %reading.farmer_id,
            timestamp = %reading.timestamp,
            "Recorded soil reading"
        );
        Ok(reading)
    }

    pub async fn health_report(&self) -> AppResult<SoilHealthReport> {
        let reading = self.latest_reading().await?;
        Ok(SoilHealthReport::from_reading(&reading, &self.thresholds))
    }

    /// Classify a value by canonical label or raw field name.
    ///
    /// Field names are mapped to their label first; anything else is looked
    /// up as given and falls through to the table's unknown-kind status.
    pub fn classify(&self, nutrient: &str, value: f64) -> Classification {
        let label = NutrientKind::from_field(nutrient)
            .map(|kind| kind.label())
            .unwrap_or(nutrient);

        Classification {
            nutrient: label.to_string(),
            value,
            status: self.thresholds.classify(value, label),
        }
    }

    /// Compare two readings. Defaults to the current farmer's oldest against their latest.
    pub async fn compare(
        &self,
        before: Option<Uuid>,
        after: Option<Uuid>,
    ) -> AppResult<ReadingComparison> {
        let state = self.dashboard.read().await;

        let find = |id: Option<Uuid>, fallback: Option<&SoilReading>| -> AppResult<SoilReading> {
            match id {
                Some(id) => state
                    .find_reading(id)
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(format!("Soil reading {}", id))),
                None => fallback
                    .cloned()
                    .ok_or_else(|| AppError::NotFound("Soil reading".to_string())),
            }
        };

        let before = find(before, state.current_readings().last())?;
        let after = find(after, state.latest_reading())?;
        Ok(ReadingComparison::between(&before, &after, &self.thresholds))
    }
}
