//! Business logic services for the AgriSense platform

use std::sync::Arc;

use shared::{reduce, Action, DashboardState};
use tokio::sync::RwLock;

pub mod farmer;
pub mod fertilizer;
pub mod recommendation;
pub mod reporting;
pub mod research;
pub mod soil;
pub mod trend;
pub mod weather;

pub use farmer::FarmerService;
pub use fertilizer::FertilizerService;
pub use recommendation::{RecommendationService, RecommendationTracker};
pub use reporting::ReportingService;
pub use research::ResearchService;
pub use soil::SoilService;
pub use trend::TrendService;
pub use weather::WeatherService;

/// Dashboard state shared between handlers
pub type SharedDashboard = Arc<RwLock<DashboardState>>;

/// Apply an action to the shared dashboard state
pub async fn dispatch(dashboard: &SharedDashboard, action: Action) {
    let mut state = dashboard.write().await;
    let current = std::mem::take(&mut *state);
    *state = reduce(current, action);
}
