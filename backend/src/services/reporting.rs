//! Reporting service for data export

use serde::Serialize;

use super::SharedDashboard;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ReportingService {
    dashboard: SharedDashboard,
}

impl ReportingService {
    pub fn new(dashboard: SharedDashboard) -> Self {
        Self { dashboard }
    }

    /// Soil readings as CSV, newest first
    pub async fn readings_csv(&self) -> AppResult<String> {
        let state = self.dashboard.read().await;
        Self::export_to_csv(&state.soil_readings)
    }

    /// Fertilizer logs as CSV, in entry order
    pub async fn fertilizer_logs_csv(&self) -> AppResult<String> {
        let state = self.dashboard.read().await;
        Self::export_to_csv(&state.fertilizer_logs)
    }

    /// Export data to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
