//! Trend series for the dashboard charts

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use shared::{
    ReadingHistory, SoilReading, SyntheticTrend, TrendPoint, TrendSource, MAX_TREND_DAYS,
};

use super::SharedDashboard;
use crate::config::TrendConfig;

pub const DEFAULT_TREND_DAYS: usize = 7;

/// Where trend points come from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendSourceKind {
    #[default]
    Synthetic,
    History,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendSeries {
    pub source: TrendSourceKind,
    pub days: usize,
    pub points: Vec<TrendPoint>,
}

/// Service producing bounded trend series
#[derive(Clone)]
pub struct TrendService {
    dashboard: SharedDashboard,
    config: TrendConfig,
}

impl TrendService {
    pub fn new(dashboard: SharedDashboard, config: TrendConfig) -> Self {
        Self { dashboard, config }
    }

    /// Clamp requested days to `[1, max_days]`, with `max_days` capped at `MAX_TREND_DAYS`
    pub fn clamp_days(&self, days: Option<usize>) -> usize {
        let max_days = self.config.max_days.clamp(1, MAX_TREND_DAYS);
        days.unwrap_or(DEFAULT_TREND_DAYS).clamp(1, max_days)
    }

    pub async fn trend(&self, days: Option<usize>, source: TrendSourceKind) -> TrendSeries {
        self.trend_until(days, source, Utc::now().date_naive()).await
    }

    pub async fn trend_until(
        &self,
        days: Option<usize>,
        source: TrendSourceKind,
        today: NaiveDate,
    ) -> TrendSeries {
        let days = self.clamp_days(days);

        let points = match source {
            TrendSourceKind::Synthetic => {
                let rng = match self.config.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                SyntheticTrend::new(rng).trend(days, today)
            }
            TrendSourceKind::History => {
                let readings: Vec<SoilReading> =
                    self.dashboard.read().await.current_readings().cloned().collect();
                ReadingHistory::new(&readings).trend(days, today)
            }
        };

        tracing::debug!(?source, days, points = points.len(), "Built trend series");
        TrendSeries {
            source,
            days,
            points,
        }
    }
}
