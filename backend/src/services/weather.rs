//! Weather service for the dashboard weather card

use serde::Serialize;
use shared::{WeatherCondition, WeatherSnapshot};

/// Current weather with its derived condition
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    #[serde(flatten)]
    pub snapshot: WeatherSnapshot,
    pub condition: WeatherCondition,
}

#[derive(Clone)]
pub struct WeatherService {
    snapshot: WeatherSnapshot,
}

impl WeatherService {
    pub fn new(snapshot: WeatherSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn current(&self) -> WeatherReport {
        WeatherReport {
            condition: self.snapshot.condition(),
            snapshot: self.snapshot.clone(),
        }
    }
}
