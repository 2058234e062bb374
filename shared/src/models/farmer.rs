//! Farmer profile models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Crop type used when the active farmer has none set
pub const DEFAULT_CROP_TYPE: &str = "Rice";

/// A farmer profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Farmer {
    pub id: Uuid,
    pub name: String,
    pub contact_info: Option<String>,
    pub location: String,
    pub crop_type: Option<String>,
}

impl Farmer {
    /// Configured crop type, ignoring blank values
    pub fn crop(&self) -> Option<&str> {
        self.crop_type
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Crop type of the given farmer, or [`DEFAULT_CROP_TYPE`]
pub fn crop_type_or_default(farmer: Option<&Farmer>) -> &str {
    farmer.and_then(Farmer::crop).unwrap_or(DEFAULT_CROP_TYPE)
}
