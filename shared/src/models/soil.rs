//! Soil sensor reading models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// The seven tracked soil measurements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKind {
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    Moisture,
    ElectricalConductivity,
    Temperature,
}

impl NutrientKind {
    /// All kinds in dashboard display order
    pub const ALL: [NutrientKind; 7] = [
        NutrientKind::Nitrogen,
        NutrientKind::Phosphorus,
        NutrientKind::Potassium,
        NutrientKind::Ph,
        NutrientKind::Moisture,
        NutrientKind::ElectricalConductivity,
        NutrientKind::Temperature,
    ];

    /// Canonical label, used as the threshold table key
    pub fn label(&self) -> &'static str {
        match self {
            NutrientKind::Nitrogen => "Nitrogen",
            NutrientKind::Phosphorus => "Phosphorus",
            NutrientKind::Potassium => "Potassium",
            NutrientKind::Ph => "pH Level",
            NutrientKind::Moisture => "Moisture",
            NutrientKind::ElectricalConductivity => "Electrical Conductivity",
            NutrientKind::Temperature => "Temperature",
        }
    }

    /// Raw field abbreviation as reported by the sensor
    pub fn field(&self) -> &'static str {
        match self {
            NutrientKind::Nitrogen => "N",
            NutrientKind::Phosphorus => "P",
            NutrientKind::Potassium => "K",
            NutrientKind::Ph => "pH",
            NutrientKind::Moisture => "moisture",
            NutrientKind::ElectricalConductivity => "EC",
            NutrientKind::Temperature => "temperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            NutrientKind::Nitrogen | NutrientKind::Phosphorus | NutrientKind::Potassium => "mg/kg",
            NutrientKind::Ph => "",
            NutrientKind::Moisture => "%",
            NutrientKind::ElectricalConductivity => "dS/m",
            NutrientKind::Temperature => "°C",
        }
    }

    /// Look up a kind by its canonical label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    /// Map a raw sensor field name to its kind
    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.field() == field)
    }
}

impl std::fmt::Display for NutrientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown nutrient kind: {0}")]
pub struct UnknownNutrient(pub String);

impl std::str::FromStr for NutrientKind {
    type Err = UnknownNutrient;

    /// Accepts either the canonical label or the raw field name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .or_else(|| Self::from_field(s))
            .ok_or_else(|| UnknownNutrient(s.to_string()))
    }
}

/// A single soil sensor snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilReading {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Nitrogen in mg/kg
    #[serde(rename = "N")]
    pub nitrogen: f64,
    /// Phosphorus in mg/kg
    #[serde(rename = "P")]
    pub phosphorus: f64,
    /// Potassium in mg/kg
    #[serde(rename = "K")]
    pub potassium: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    /// Moisture percentage
    pub moisture: f64,
    /// Electrical conductivity in dS/m
    #[serde(rename = "EC")]
    pub ec: f64,
    /// Temperature in Celsius
    pub temperature: f64,
}

impl SoilReading {
    pub fn value_of(&self, kind: NutrientKind) -> f64 {
        match kind {
            NutrientKind::Nitrogen => self.nitrogen,
            NutrientKind::Phosphorus => self.phosphorus,
            NutrientKind::Potassium => self.potassium,
            NutrientKind::Ph => self.ph,
            NutrientKind::Moisture => self.moisture,
            NutrientKind::ElectricalConductivity => self.ec,
            NutrientKind::Temperature => self.temperature,
        }
    }

    /// `(kind, value)` pairs in display order
    pub fn values(&self) -> impl Iterator<Item = (NutrientKind, f64)> + '_ {
        NutrientKind::ALL.into_iter().map(|k| (k, self.value_of(k)))
    }
}

/// Input for recording a new soil reading
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewSoilReading {
    pub farmer_id: Option<Uuid>,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "N")]
    #[validate(range(min = 0.0))]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    #[validate(range(min = 0.0))]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    #[validate(range(min = 0.0))]
    pub potassium: f64,
    #[serde(rename = "pH")]
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub moisture: f64,
    #[serde(rename = "EC")]
    #[validate(range(min = 0.0))]
    pub ec: f64,
    pub temperature: f64,
}

impl NewSoilReading {
    /// Build the immutable reading; missing farmer and timestamp fall back to the given defaults
    pub fn into_reading(self, default_farmer: Uuid, now: DateTime<Utc>) -> SoilReading {
        SoilReading {
            id: Uuid::new_v4(),
            farmer_id: self.farmer_id.unwrap_or(default_farmer),
            timestamp: self.timestamp.unwrap_or(now),
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            ph: self.ph,
            moisture: self.moisture,
            ec: self.ec,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_and_field_lookup() {
        for kind in NutrientKind::ALL {
            assert_eq!(NutrientKind::from_label(kind.label()), Some(kind));
            assert_eq!(NutrientKind::from_field(kind.field()), Some(kind));
        }
        assert_eq!(NutrientKind::from_label("pH"), None);
        assert_eq!("pH".parse::<NutrientKind>(), Ok(NutrientKind::Ph));
        assert_eq!("pH Level".parse::<NutrientKind>(), Ok(NutrientKind::Ph));
        assert_eq!(
            "Sulfur".parse::<NutrientKind>().unwrap_err().to_string(),
            "Unknown nutrient kind: Sulfur"
        );
    }

    #[test]
    fn test_reading_wire_field_names() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "farmer_id": "00000000-0000-0000-0000-000000000002",
            "timestamp": "2025-08-17T08:00:00Z",
            "N": 45, "P": 25, "K": 180, "pH": 6.2,
            "moisture": 75, "EC": 1.2, "temperature": 28
        }"#;
        let reading: SoilReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.nitrogen, 45.0);
        assert_eq!(reading.value_of(NutrientKind::Ph), 6.2);
        assert_eq!(reading.value_of(NutrientKind::ElectricalConductivity), 1.2);
        assert_eq!(reading.values().count(), 7);
    }

    #[test]
    fn test_new_reading_validation() {
        let input = NewSoilReading {
            farmer_id: None,
            timestamp: None,
            nitrogen: 45.0,
            phosphorus: 25.0,
            potassium: 180.0,
            ph: 15.0,
            moisture: 75.0,
            ec: 1.2,
            temperature: 28.0,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("ph"));
    }
}
