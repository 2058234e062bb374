//! Reporting handlers for data export

use axum::{extract::State, http::header, response::IntoResponse};

use crate::error::AppResult;
use crate::services::ReportingService;
use crate::AppState;

fn csv_attachment(filename: &str, csv: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
}

/// Export soil readings of all farms as CSV
pub async fn export_readings_csv(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.dashboard);
    let csv = service.readings_csv().await?;
    Ok(csv_attachment("soil_readings.csv", csv))
}

/// Export fertilizer logs of all farms as CSV
pub async fn export_fertilizer_logs_csv(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.dashboard);
    let csv = service.fertilizer_logs_csv().await?;
    Ok(csv_attachment("fertilizer_logs.csv", csv))
}
