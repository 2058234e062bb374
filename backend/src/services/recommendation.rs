//! Recommendation refresh: request assembly, dispatch and result tracking

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{
    build_request, Action, ConfidenceLevel, DashboardState, Farmer, RecommendationRequest,
    RecommendationResponse, RequestDefaults, SoilReading, StoredRecommendation,
};
use tokio::sync::RwLock;

use super::{dispatch, SharedDashboard};
use crate::error::AppError;
use crate::external::PredictionClient;

const FAILURE_PREFIX: &str = "Failed to get AI recommendation: ";

/// Identifies one refresh. Only the most recently issued ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Loading/result/error state of the recommendation panel
#[derive(Debug, Default)]
pub struct RecommendationTracker {
    generation: u64,
    loading: bool,
    request: Option<RecommendationRequest>,
    response: Option<RecommendationResponse>,
    error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl RecommendationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh, superseding any in flight
    pub fn begin(&mut self, request: RecommendationRequest) -> Ticket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.request = Some(request);
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Apply an outcome. Returns false and leaves state untouched for stale tickets.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<RecommendationResponse, String>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "Discarding superseded recommendation outcome"
            );
            return false;
        }

        self.loading = false;
        self.updated_at = Some(Utc::now());
        match outcome {
            Ok(response) => {
                self.response = Some(response);
                self.error = None;
            }
            Err(detail) => {
                // last good response stays visible
                self.error = Some(format!("{}{}", FAILURE_PREFIX, detail));
            }
        }
        true
    }

    pub fn view(&self) -> RecommendationView {
        RecommendationView {
            loading: self.loading,
            confidence_level: self.response.as_ref().map(RecommendationResponse::confidence_level),
            response: self.response.clone(),
            error: self.error.clone(),
            request: self.request.clone(),
            updated_at: self.updated_at,
            history: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub loading: bool,
    pub response: Option<RecommendationResponse>,
    pub confidence_level: Option<ConfidenceLevel>,
    pub error: Option<String>,
    /// Body of the most recent request
    pub request: Option<RecommendationRequest>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Stored recommendations of the current farmer
    pub history: Vec<StoredRecommendation>,
}

/// Service that assembles and dispatches recommendation requests
#[derive(Clone)]
pub struct RecommendationService {
    dashboard: SharedDashboard,
    tracker: Arc<RwLock<RecommendationTracker>>,
    client: PredictionClient,
    defaults: RequestDefaults,
}

impl RecommendationService {
    pub fn new(
        dashboard: SharedDashboard,
        tracker: Arc<RwLock<RecommendationTracker>>,
        client: PredictionClient,
        defaults: RequestDefaults,
    ) -> Self {
        Self {
            dashboard,
            tracker,
            client,
            defaults,
        }
    }

    /// Request body for the current dashboard state
    pub async fn current_request(&self) -> RecommendationRequest {
        self.request_for(&*self.dashboard.read().await)
    }

    /// Built from the current farmer's readings only
    fn request_for(&self, state: &DashboardState) -> RecommendationRequest {
        let readings: Vec<SoilReading> = state.current_readings().cloned().collect();
        build_request(
            &readings,
            state.current_farmer.as_ref().and_then(Farmer::crop),
            &self.defaults,
        )
    }

    pub async fn view(&self) -> RecommendationView {
        let mut view = self.tracker.read().await.view();
        view.history = self.history().await;
        view
    }

    /// Assemble a request, call the prediction service and record the outcome.
    ///
    /// Failures end up in the returned view's `error`, never as an `Err`.
    pub async fn refresh(&self) -> RecommendationView {
        let (request, farmer_id) = {
            let state = self.dashboard.read().await;
            (self.request_for(&state), state.current_farmer_id())
        };
        let ticket = self.tracker.write().await.begin(request.clone());

        let outcome = self.client.predict(&request).await.map_err(|e| {
            tracing::error!("Prediction request failed: {}", e);
            failure_detail(e)
        });

        let stored = match (&outcome, farmer_id) {
            (Ok(response), Some(farmer_id)) => {
                Some(StoredRecommendation::from_response(farmer_id, response, Utc::now()))
            }
            _ => None,
        };

        let applied = self.tracker.write().await.complete(ticket, outcome);
        if applied {
            if let Some(recommendation) = stored {
                tracing::info!(
                    recommendation = %recommendation.recommendation,
                    confidence = %recommendation.confidence,
                    "Stored AI recommendation"
                );
                dispatch(&self.dashboard, Action::AddRecommendation(recommendation)).await;
            }
        }

        self.view().await
    }

    async fn history(&self) -> Vec<StoredRecommendation> {
        let state = self.dashboard.read().await;
        let farmer_id = state.current_farmer_id();
        state
            .recommendations
            .iter()
            .filter(|r| Some(r.farmer_id) == farmer_id)
            .cloned()
            .collect()
    }
}

fn failure_detail(error: AppError) -> String {
    match error {
        AppError::PredictionService(detail) => detail,
        other => other.to_string(),
    }
}
