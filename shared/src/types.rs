//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Inclusive numeric range `[min, max]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both bounds are inclusive
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when `self` lies entirely inside `other`
    pub fn is_within(&self, other: &ValueRange) -> bool {
        self.min >= other.min && self.max <= other.max
    }
}

/// Dashboard persona
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Farmer,
    Researcher,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Farmer => write!(f, "farmer"),
            UserType::Researcher => write!(f, "researcher"),
        }
    }
}

/// Date range for queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}

impl DateRange {
    /// Both ends are inclusive
    pub fn contains(&self, date: chrono::NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
