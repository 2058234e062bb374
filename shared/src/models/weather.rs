//! Weather data models

use serde::{Deserialize, Serialize};

/// Current conditions shown next to the soil cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
    pub forecast: String,
    pub rainfall_prediction: String,
}

impl WeatherSnapshot {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_forecast(&self.forecast)
    }
}

/// Coarse condition derived from the forecast text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Rain,
    Cloudy,
    Clear,
}

impl WeatherCondition {
    /// Rain takes precedence over clouds
    pub fn from_forecast(forecast: &str) -> Self {
        let text = forecast.to_lowercase();
        if text.contains("rain") {
            WeatherCondition::Rain
        } else if text.contains("cloudy") {
            WeatherCondition::Cloudy
        } else {
            WeatherCondition::Clear
        }
    }
}
