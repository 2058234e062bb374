//! Whole-reading health summaries and before/after comparisons

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::farmer::{crop_type_or_default, Farmer};
use super::soil::{NutrientKind, SoilReading};
use super::threshold::{HealthStatus, ThresholdTable};

/// Overall soil health tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    Good,
    Fair,
    Poor,
}

impl HealthTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            HealthTier::Good
        } else if score >= 70.0 {
            HealthTier::Fair
        } else {
            HealthTier::Poor
        }
    }
}

/// Classification of one nutrient within a reading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutrientStatus {
    pub kind: NutrientKind,
    pub label: String,
    pub value: f64,
    pub unit: String,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilHealthReport {
    pub reading_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub nutrients: Vec<NutrientStatus>,
    /// Mean of per-nutrient status scores, 0-100
    pub score: f64,
    pub tier: HealthTier,
}

impl SoilHealthReport {
    pub fn from_reading(reading: &SoilReading, table: &ThresholdTable) -> Self {
        let nutrients: Vec<NutrientStatus> = reading
            .values()
            .map(|(kind, value)| NutrientStatus {
                kind,
                label: kind.label().to_string(),
                value,
                unit: kind.unit().to_string(),
                status: table.classify_kind(value, kind),
            })
            .collect();

        let score =
            nutrients.iter().map(|n| n.status.score()).sum::<f64>() / nutrients.len() as f64;

        Self {
            reading_id: reading.id,
            timestamp: reading.timestamp,
            nutrients,
            score,
            tier: HealthTier::from_score(score),
        }
    }

    pub fn count(&self, status: HealthStatus) -> usize {
        self.nutrients.iter().filter(|n| n.status == status).count()
    }
}

/// Soil health of one farm, from its latest reading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmHealth {
    pub farmer_id: Uuid,
    pub farmer: String,
    pub location: String,
    pub crop_type: String,
    /// `None` until the farm has a reading
    pub latest_reading_at: Option<DateTime<Utc>>,
    pub score: Option<f64>,
    pub tier: Option<HealthTier>,
}

/// Researcher view across every known farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmsOverview {
    pub farms: Vec<FarmHealth>,
    pub farm_count: usize,
    /// Mean over farms with a reading
    pub average_score: Option<f64>,
    pub average_tier: Option<HealthTier>,
}

impl FarmsOverview {
    /// `readings` must be newest first; each farm is scored on its first match
    pub fn build(farmers: &[Farmer], readings: &[SoilReading], table: &ThresholdTable) -> Self {
        let farms: Vec<FarmHealth> = farmers
            .iter()
            .map(|farmer| {
                let report = readings
                    .iter()
                    .find(|r| r.farmer_id == farmer.id)
                    .map(|r| SoilHealthReport::from_reading(r, table));
                FarmHealth {
                    farmer_id: farmer.id,
                    farmer: farmer.name.clone(),
                    location: farmer.location.clone(),
                    crop_type: crop_type_or_default(Some(farmer)).to_string(),
                    latest_reading_at: report.as_ref().map(|r| r.timestamp),
                    score: report.as_ref().map(|r| r.score),
                    tier: report.as_ref().map(|r| r.tier),
                }
            })
            .collect();

        let scores: Vec<f64> = farms.iter().filter_map(|f| f.score).collect();
        let average_score =
            (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64);

        Self {
            farm_count: farms.len(),
            average_tier: average_score.map(HealthTier::from_score),
            average_score,
            farms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutrientChange {
    pub kind: NutrientKind,
    pub label: String,
    pub before: f64,
    pub after: f64,
    pub change: f64,
    /// `None` when the earlier value is zero
    pub change_percent: Option<f64>,
    pub status_before: HealthStatus,
    pub status_after: HealthStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingComparison {
    pub before_id: Uuid,
    pub after_id: Uuid,
    pub changes: Vec<NutrientChange>,
}

impl ReadingComparison {
    pub fn between(before: &SoilReading, after: &SoilReading, table: &ThresholdTable) -> Self {
        let changes = NutrientKind::ALL
            .into_iter()
            .map(|kind| {
                let b = before.value_of(kind);
                let a = after.value_of(kind);
                NutrientChange {
                    kind,
                    label: kind.label().to_string(),
                    before: b,
                    after: a,
                    change: a - b,
                    change_percent: (b != 0.0).then(|| (a - b) / b * 100.0),
                    status_before: table.classify_kind(b, kind),
                    status_after: table.classify_kind(a, kind),
                }
            })
            .collect();

        Self {
            before_id: before.id,
            after_id: after.id,
            changes,
        }
    }

    pub fn change_of(&self, kind: NutrientKind) -> Option<&NutrientChange> {
        self.changes.iter().find(|c| c.kind == kind)
    }
}
