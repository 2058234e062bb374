//! Dashboard state and its transitions
//!
//! All mutation goes through [`reduce`]; holders of a [`DashboardState`]
//! never edit collections directly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    crop_type_or_default, Farmer, FertilizerLogEntry, SoilReading, StoredRecommendation,
};
use crate::types::UserType;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardState {
    pub user_type: UserType,
    pub current_farmer: Option<Farmer>,
    pub farmers: Vec<Farmer>,
    /// Newest first by timestamp
    pub soil_readings: Vec<SoilReading>,
    /// In entry order
    pub fertilizer_logs: Vec<FertilizerLogEntry>,
    pub recommendations: Vec<StoredRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    SetUserType(UserType),
    SetCurrentFarmer(Farmer),
    AddFertilizerLog(FertilizerLogEntry),
    RecordSoilReading(SoilReading),
    AddRecommendation(StoredRecommendation),
}

/// Apply an action, returning the next state
pub fn reduce(mut state: DashboardState, action: Action) -> DashboardState {
    match action {
        Action::SetUserType(user_type) => state.user_type = user_type,
        Action::SetCurrentFarmer(farmer) => state.current_farmer = Some(farmer),
        Action::AddFertilizerLog(entry) => state.fertilizer_logs.push(entry),
        Action::RecordSoilReading(reading) => {
            // ahead of any reading with the same timestamp
            let at = state
                .soil_readings
                .partition_point(|r| r.timestamp > reading.timestamp);
            state.soil_readings.insert(at, reading);
        }
        Action::AddRecommendation(recommendation) => state.recommendations.push(recommendation),
    }
    state
}

impl DashboardState {
    /// Readings of one farmer, newest first
    pub fn readings_for(&self, farmer_id: Uuid) -> impl Iterator<Item = &SoilReading> + '_ {
        self.soil_readings
            .iter()
            .filter(move |r| r.farmer_id == farmer_id)
    }

    /// Readings of the current farmer, newest first. Without a selected
    /// farmer every reading is in scope.
    pub fn current_readings(&self) -> impl Iterator<Item = &SoilReading> + '_ {
        let farmer_id = self.current_farmer_id();
        self.soil_readings
            .iter()
            .filter(move |r| farmer_id.map_or(true, |id| r.farmer_id == id))
    }

    /// Most recent reading of the current farmer
    pub fn latest_reading(&self) -> Option<&SoilReading> {
        self.current_readings().next()
    }

    /// Fertilizer logs of the current farmer, in entry order
    pub fn current_fertilizer_logs(&self) -> impl Iterator<Item = &FertilizerLogEntry> + '_ {
        let farmer_id = self.current_farmer_id();
        self.fertilizer_logs
            .iter()
            .filter(move |log| farmer_id.map_or(true, |id| log.farmer_id == id))
    }

    pub fn find_farmer(&self, id: Uuid) -> Option<&Farmer> {
        self.farmers.iter().find(|f| f.id == id)
    }

    pub fn find_reading(&self, id: Uuid) -> Option<&SoilReading> {
        self.soil_readings.iter().find(|r| r.id == id)
    }

    /// Crop type of the current farmer, or the default crop
    pub fn crop_type(&self) -> &str {
        crop_type_or_default(self.current_farmer.as_ref())
    }

    pub fn current_farmer_id(&self) -> Option<Uuid> {
        self.current_farmer.as_ref().map(|f| f.id)
    }
}
