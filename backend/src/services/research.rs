//! Researcher overview across farms

use std::sync::Arc;

use shared::{FarmsOverview, ThresholdTable};

use super::SharedDashboard;

/// Multi-farm soil health for the researcher persona
#[derive(Clone)]
pub struct ResearchService {
    dashboard: SharedDashboard,
    thresholds: Arc<ThresholdTable>,
}

impl ResearchService {
    pub fn new(dashboard: SharedDashboard, thresholds: Arc<ThresholdTable>) -> Self {
        Self {
            dashboard,
            thresholds,
        }
    }

    /// Every farm scored on its own latest reading
    pub async fn farms_overview(&self) -> FarmsOverview {
        let state = self.dashboard.read().await;
        let overview = FarmsOverview::build(&state.farmers, &state.soil_readings, &self.thresholds);
        tracing::debug!(
            farms = overview.farm_count,
            average_score = ?overview.average_score,
            "Built farms overview"
        );
        overview
    }
}
