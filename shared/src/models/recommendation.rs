//! Fertilizer recommendation request/response models and request assembly

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::farmer::DEFAULT_CROP_TYPE;
use super::soil::SoilReading;

/// Body sent to the prediction service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRequest {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub moisture: f64,
    pub soil_type: String,
    pub crop_type: String,
}

/// Prediction service response. Extra fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub predicted_fertilizer: String,
    /// Model confidence in `[0, 1]`
    pub confidence: f64,
    /// Generation time as reported by the service
    pub timestamp: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl RecommendationResponse {
    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence)
    }
}

/// Bucketed model confidence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceLevel::High
        } else if confidence >= 0.6 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "High"),
            ConfidenceLevel::Medium => write!(f, "Medium"),
            ConfidenceLevel::Low => write!(f, "Low"),
        }
    }
}

/// Values used when no reading is available
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestDefaults {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    /// Sent with every request; readings carry no humidity
    pub humidity: f64,
    pub moisture: f64,
    /// Sent with every request
    pub soil_type: String,
    /// Used when the farmer has no crop type
    pub crop_type: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            nitrogen: 15.0,
            phosphorus: 10.0,
            potassium: 20.0,
            temperature: 28.0,
            humidity: 65.0,
            moisture: 45.0,
            soil_type: "Loamy".to_string(),
            crop_type: DEFAULT_CROP_TYPE.to_string(),
        }
    }
}

/// Assemble a prediction request.
///
/// `readings` is ordered newest first and is not re-sorted: index 0 is the
/// reading used. Blank crop types fall back to the defaults.
pub fn build_request(
    readings: &[SoilReading],
    crop_type: Option<&str>,
    defaults: &RequestDefaults,
) -> RecommendationRequest {
    let crop_type = crop_type
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(defaults.crop_type.as_str())
        .to_string();

    match readings.first() {
        Some(latest) => RecommendationRequest {
            nitrogen: latest.nitrogen,
            phosphorus: latest.phosphorus,
            potassium: latest.potassium,
            temperature: latest.temperature,
            humidity: defaults.humidity,
            moisture: latest.moisture,
            soil_type: defaults.soil_type.clone(),
            crop_type,
        },
        None => RecommendationRequest {
            nitrogen: defaults.nitrogen,
            phosphorus: defaults.phosphorus,
            potassium: defaults.potassium,
            temperature: defaults.temperature,
            humidity: defaults.humidity,
            moisture: defaults.moisture,
            soil_type: defaults.soil_type.clone(),
            crop_type,
        },
    }
}

/// A recommendation kept in the farmer's history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredRecommendation {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub recommendation: String,
    pub confidence: ConfidenceLevel,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StoredRecommendation {
    pub fn from_response(
        farmer_id: Uuid,
        response: &RecommendationResponse,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            farmer_id,
            recommendation: response.predicted_fertilizer.clone(),
            confidence: response.confidence_level(),
            notes: (!response.recommendations.is_empty())
                .then(|| response.recommendations.join(" ")),
            created_at: now,
        }
    }
}
