//! HTTP handlers for the weather card

use axum::{extract::State, Json};

use crate::services::weather::{WeatherReport, WeatherService};
use crate::AppState;

/// Current weather and derived condition
pub async fn get_current_weather(State(state): State<AppState>) -> Json<WeatherReport> {
    let service = WeatherService::new(state.weather);
    Json(service.current())
}
