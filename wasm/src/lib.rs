//! WebAssembly module for the AgriSense soil monitoring platform
//!
//! Provides client-side computation for:
//! - Soil health classification
//! - Trend series generation
//! - Recommendation request assembly
//! - Offline data validation

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    log("AgriSense WASM module loaded");
}

#[cfg(target_arch = "wasm32")]
fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn log(_message: &str) {}

fn js_error(context: &str, error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, error))
}

/// Classify a nutrient value; returns "healthy", "warning" or "deficient"
#[wasm_bindgen]
pub fn classify_nutrient(value: f64, nutrient: &str) -> String {
    classify(value, nutrient).as_str().to_string()
}

/// Canonical nutrient labels in display order
#[wasm_bindgen]
pub fn nutrient_labels() -> js_sys::Array {
    NutrientKind::ALL
        .iter()
        .map(|kind| JsValue::from_str(kind.label()))
        .collect()
}

/// Full health report for a reading, as JSON
#[wasm_bindgen]
pub fn soil_health_report(reading_json: &str) -> Result<String, JsValue> {
    let reading: SoilReading =
        serde_json::from_str(reading_json).map_err(|e| js_error("Invalid reading JSON", e))?;
    let report = SoilHealthReport::from_reading(&reading, standard_thresholds());
    serde_json::to_string(&report).map_err(|e| js_error("Serialization failed", e))
}

/// Overall soil health score (0-100) for a reading
#[wasm_bindgen]
pub fn soil_health_score(reading_json: &str) -> Result<f64, JsValue> {
    let reading: SoilReading =
        serde_json::from_str(reading_json).map_err(|e| js_error("Invalid reading JSON", e))?;
    Ok(SoilHealthReport::from_reading(&reading, standard_thresholds()).score)
}

/// Synthetic trend series ending today, as a JSON array.
///
/// A seed makes the series repeatable. At most `MAX_TREND_DAYS` points are returned.
#[wasm_bindgen]
pub fn generate_trend_json(days: usize, seed: Option<u32>) -> Result<String, JsValue> {
    let points = match seed {
        Some(seed) => SyntheticTrend::new(StdRng::seed_from_u64(u64::from(seed)))
            .trend(days, chrono::Utc::now().date_naive()),
        None => generate_trend(days),
    };
    serde_json::to_string(&points).map_err(|e| js_error("Serialization failed", e))
}

/// Build the prediction request body from readings (newest first) and a crop type
#[wasm_bindgen]
pub fn build_recommendation_request(
    readings_json: &str,
    crop_type: Option<String>,
) -> Result<String, JsValue> {
    let readings: Vec<SoilReading> =
        serde_json::from_str(readings_json).map_err(|e| js_error("Invalid readings JSON", e))?;
    let request = build_request(&readings, crop_type.as_deref(), &RequestDefaults::default());
    serde_json::to_string(&request).map_err(|e| js_error("Serialization failed", e))
}

/// Bucket a model confidence score into "High", "Medium" or "Low"
#[wasm_bindgen]
pub fn confidence_level(confidence: f64) -> String {
    ConfidenceLevel::from_score(confidence).to_string()
}

/// Weather condition ("rain", "cloudy" or "clear") for a forecast text
#[wasm_bindgen]
pub fn weather_condition(forecast: &str) -> String {
    match WeatherCondition::from_forecast(forecast) {
        WeatherCondition::Rain => "rain",
        WeatherCondition::Cloudy => "cloudy",
        WeatherCondition::Clear => "clear",
    }
    .to_string()
}

/// Validate a reading entered offline. Returns the first problem, if any.
#[wasm_bindgen]
pub fn check_soil_reading(reading_json: &str) -> Option<String> {
    match serde_json::from_str::<NewSoilReading>(reading_json) {
        Ok(reading) => validate_soil_reading(&reading).err().map(str::to_string),
        Err(e) => Some(format!("Invalid reading JSON: {}", e)),
    }
}
