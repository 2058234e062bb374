//! Validation utilities for AgriSense soil and fertilizer inputs
//!
//! Complements the `validator` derives on input payloads with checks the
//! derive attributes cannot express.

use chrono::NaiveDate;

use crate::models::{NewFertilizerLog, NewSoilReading, NutrientKind};

// ============================================================================
// Soil Reading Validations
// ============================================================================

/// Validate that a measurement is a finite number
pub fn validate_finite(value: f64) -> Result<(), &'static str> {
    if value.is_finite() {
        Ok(())
    } else {
        Err("Measurement must be a finite number")
    }
}

/// Validate soil temperature is physically plausible (-50 to 80 °C)
pub fn validate_soil_temperature(celsius: f64) -> Result<(), &'static str> {
    if !(-50.0..=80.0).contains(&celsius) {
        return Err("Soil temperature must be between -50 and 80 °C");
    }
    Ok(())
}

/// Validate pH is on the 0-14 scale
pub fn validate_ph(ph: f64) -> Result<(), &'static str> {
    if !(0.0..=14.0).contains(&ph) {
        return Err("pH must be between 0 and 14");
    }
    Ok(())
}

/// Validate moisture is a percentage
pub fn validate_moisture(moisture: f64) -> Result<(), &'static str> {
    if !(0.0..=100.0).contains(&moisture) {
        return Err("Moisture must be between 0 and 100%");
    }
    Ok(())
}

/// Validate every measurement of a new reading
pub fn validate_soil_reading(reading: &NewSoilReading) -> Result<(), &'static str> {
    let values = [
        (NutrientKind::Nitrogen, reading.nitrogen),
        (NutrientKind::Phosphorus, reading.phosphorus),
        (NutrientKind::Potassium, reading.potassium),
        (NutrientKind::Ph, reading.ph),
        (NutrientKind::Moisture, reading.moisture),
        (NutrientKind::ElectricalConductivity, reading.ec),
        (NutrientKind::Temperature, reading.temperature),
    ];

    for (kind, value) in values {
        validate_finite(value)?;
        match kind {
            NutrientKind::Ph => validate_ph(value)?,
            NutrientKind::Moisture => validate_moisture(value)?,
            NutrientKind::Temperature => validate_soil_temperature(value)?,
            _ if value < 0.0 => return Err("Nutrient concentrations cannot be negative"),
            _ => {}
        }
    }
    Ok(())
}

// ============================================================================
// Fertilizer Log Validations
// ============================================================================

/// Validate the amount starts with a positive quantity, e.g. "15ml" or "2.5 kg"
pub fn validate_fertilizer_amount(amount: &str) -> Result<(), &'static str> {
    let amount = amount.trim();
    let number_end = amount
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(amount.len());

    let quantity: f64 = amount[..number_end]
        .parse()
        .map_err(|_| "Fertilizer amount must start with a number")?;
    if quantity <= 0.0 {
        return Err("Fertilizer amount must be positive");
    }
    Ok(())
}

/// Validate the application date is not in the future
pub fn validate_application_date(date: NaiveDate, today: NaiveDate) -> Result<(), &'static str> {
    if date > today {
        return Err("Application date cannot be in the future");
    }
    Ok(())
}

/// Validate a new fertilizer log entry
pub fn validate_fertilizer_log(
    log: &NewFertilizerLog,
    today: NaiveDate,
) -> Result<(), &'static str> {
    if log.fertilizer_type.trim().is_empty() {
        return Err("Fertilizer type is required");
    }
    if log.method.trim().is_empty() {
        return Err("Application method is required");
    }
    validate_fertilizer_amount(&log.amount)?;
    validate_application_date(log.date_applied, today)
}
