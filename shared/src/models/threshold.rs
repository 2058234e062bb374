//! Soil health classification against a declarative threshold table

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::soil::NutrientKind;
use crate::types::ValueRange;

/// Three-level health classification of a nutrient reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Deficient,
}

impl HealthStatus {
    /// Lowercase name as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Warning => "warning",
            HealthStatus::Deficient => "deficient",
        }
    }

    /// Contribution to the overall soil health score
    pub fn score(&self) -> f64 {
        match self {
            HealthStatus::Healthy => 100.0,
            HealthStatus::Warning => 50.0,
            HealthStatus::Deficient => 0.0,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "Healthy"),
            HealthStatus::Warning => write!(f, "Warning"),
            HealthStatus::Deficient => write!(f, "Deficient"),
        }
    }
}

/// Healthy and warning ranges for one nutrient kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NutrientThreshold {
    pub healthy: ValueRange,
    pub warning: ValueRange,
}

impl NutrientThreshold {
    pub const fn new(healthy: (f64, f64), warning: (f64, f64)) -> Self {
        Self {
            healthy: ValueRange::new(healthy.0, healthy.1),
            warning: ValueRange::new(warning.0, warning.1),
        }
    }

    pub fn classify(&self, value: f64) -> HealthStatus {
        if self.healthy.contains(value) {
            HealthStatus::Healthy
        } else if self.warning.contains(value) {
            HealthStatus::Warning
        } else {
            HealthStatus::Deficient
        }
    }

    /// Healthy range nested inside the warning range. Expected, never enforced.
    pub fn is_nested(&self) -> bool {
        self.healthy.is_within(&self.warning)
    }
}

/// Threshold entries keyed by canonical nutrient label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ThresholdTable {
    entries: BTreeMap<String, NutrientThreshold>,
}

impl ThresholdTable {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The agronomic reference table used by the dashboard
    pub fn standard() -> Self {
        Self::new()
            .with(
                NutrientKind::Nitrogen.label(),
                NutrientThreshold::new((40.0, 60.0), (30.0, 70.0)),
            )
            .with(
                NutrientKind::Phosphorus.label(),
                NutrientThreshold::new((20.0, 35.0), (15.0, 40.0)),
            )
            .with(
                NutrientKind::Potassium.label(),
                NutrientThreshold::new((150.0, 200.0), (120.0, 220.0)),
            )
            .with(NutrientKind::Ph.label(), NutrientThreshold::new((6.0, 7.0), (5.5, 7.5)))
            .with(
                NutrientKind::Moisture.label(),
                NutrientThreshold::new((60.0, 80.0), (50.0, 85.0)),
            )
            .with(
                NutrientKind::ElectricalConductivity.label(),
                NutrientThreshold::new((1.0, 2.0), (0.8, 2.5)),
            )
            .with(
                NutrientKind::Temperature.label(),
                NutrientThreshold::new((25.0, 30.0), (20.0, 35.0)),
            )
    }

    /// Add or replace an entry
    pub fn with(mut self, label: impl Into<String>, threshold: NutrientThreshold) -> Self {
        self.entries.insert(label.into(), threshold);
        self
    }

    pub fn get(&self, label: &str) -> Option<&NutrientThreshold> {
        self.entries.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Classify a value for the nutrient with the given label.
    ///
    /// Labels missing from the table classify as [`HealthStatus::Warning`].
    pub fn classify(&self, value: f64, label: &str) -> HealthStatus {
        match self.get(label) {
            Some(threshold) => threshold.classify(value),
            None => HealthStatus::Warning,
        }
    }

    pub fn classify_kind(&self, value: f64, kind: NutrientKind) -> HealthStatus {
        self.classify(value, kind.label())
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Shared instance of [`ThresholdTable::standard`]
pub fn standard_thresholds() -> &'static ThresholdTable {
    static TABLE: OnceLock<ThresholdTable> = OnceLock::new();
    TABLE.get_or_init(ThresholdTable::standard)
}

/// Classify against the standard table
pub fn classify(value: f64, nutrient: &str) -> HealthStatus {
    standard_thresholds().classify(value, nutrient)
}
