//! Demo data loaded at startup

use chrono::{NaiveDate, TimeZone, Utc};
use shared::{
    ConfidenceLevel, DashboardState, Farmer, FertilizerLogEntry, SoilReading,
    StoredRecommendation, UserType, WeatherSnapshot,
};
use uuid::Uuid;

pub const JUAN_DELA_CRUZ: Uuid = Uuid::from_u128(0x1);
pub const MARIA_SANTOS: Uuid = Uuid::from_u128(0x2);

pub fn farmers() -> Vec<Farmer> {
    vec![
        Farmer {
            id: JUAN_DELA_CRUZ,
            name: "Juan Dela Cruz".to_string(),
            contact_info: Some("+63 912 345 6789".to_string()),
            location: "Laguna, Philippines".to_string(),
            crop_type: Some("Rice".to_string()),
        },
        Farmer {
            id: MARIA_SANTOS,
            name: "Maria Santos".to_string(),
            contact_info: Some("+63 917 234 5678".to_string()),
            location: "Nueva Ecija, Philippines".to_string(),
            crop_type: Some("Corn".to_string()),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn reading(
    id: u128,
    day: u32,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    ph: f64,
    moisture: f64,
    ec: f64,
    temperature: f64,
) -> SoilReading {
    SoilReading {
        id: Uuid::from_u128(0x100 + id),
        farmer_id: JUAN_DELA_CRUZ,
        timestamp: Utc
            .with_ymd_and_hms(2025, 8, day, 8, 0, 0)
            .single()
            .unwrap_or_default(),
        nitrogen,
        phosphorus,
        potassium,
        ph,
        moisture,
        ec,
        temperature,
    }
}

/// Newest first
pub fn soil_readings() -> Vec<SoilReading> {
    vec![
        reading(1, 17, 45.0, 25.0, 180.0, 6.2, 75.0, 1.2, 28.0),
        reading(2, 16, 42.0, 23.0, 175.0, 6.1, 72.0, 1.1, 27.0),
        reading(3, 15, 40.0, 22.0, 170.0, 6.0, 70.0, 1.0, 26.0),
    ]
}

fn log(
    id: u128,
    date: NaiveDate,
    fertilizer: &str,
    amount: &str,
    method: &str,
) -> FertilizerLogEntry {
    FertilizerLogEntry {
        id: Uuid::from_u128(0x200 + id),
        farmer_id: JUAN_DELA_CRUZ,
        date_applied: date,
        fertilizer_type: fertilizer.to_string(),
        amount: amount.to_string(),
        method: method.to_string(),
        logged_at: date.and_hms_opt(8, 0, 0).unwrap_or_default().and_utc(),
    }
}

pub fn fertilizer_logs() -> Vec<FertilizerLogEntry> {
    let aug = |day| NaiveDate::from_ymd_opt(2025, 8, day).unwrap_or_default();
    vec![
        log(1, aug(10), "Nano-Nitrogen", "15ml", "Basal Application"),
        log(2, aug(1), "Nano-Phosphorus", "10ml", "Top-up Application"),
    ]
}

pub fn recommendations() -> Vec<StoredRecommendation> {
    vec![StoredRecommendation {
        id: Uuid::from_u128(0x301),
        farmer_id: JUAN_DELA_CRUZ,
        recommendation: "Apply 12ml Nano-Nitrogen in 3 days".to_string(),
        confidence: ConfidenceLevel::High,
        notes: Some("Soil nitrogen levels are optimal. Continue current schedule.".to_string()),
        created_at: Utc
            .with_ymd_and_hms(2025, 8, 17, 9, 0, 0)
            .single()
            .unwrap_or_default(),
    }]
}

pub fn weather() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_celsius: 32.0,
        humidity_percent: 78.0,
        forecast: "Partly cloudy".to_string(),
        rainfall_prediction: "Light rain expected in 2 days".to_string(),
    }
}

/// Initial dashboard state with the first farmer selected
pub fn dashboard_state() -> DashboardState {
    let farmers = farmers();
    DashboardState {
        user_type: UserType::Farmer,
        current_farmer: farmers.first().cloned(),
        farmers,
        soil_readings: soil_readings(),
        fertilizer_logs: fertilizer_logs(),
        recommendations: recommendations(),
    }
}
