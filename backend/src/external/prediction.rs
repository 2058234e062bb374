//! Fertilizer Prediction Client
//!
//! Client for the external fertilizer prediction service.

use std::time::Duration;

use reqwest::Client;
use shared::{RecommendationRequest, RecommendationResponse};

use crate::config::PredictionConfig;
use crate::error::{AppError, AppResult};

/// Client for the fertilizer prediction service
#[derive(Clone)]
pub struct PredictionClient {
    base_url: String,
    http_client: Client,
}

impl PredictionClient {
    /// Create a new prediction client. No timeout is applied unless given.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn from_config(config: &PredictionConfig) -> AppResult<Self> {
        Self::new(
            config.base_url.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    /// Request a fertilizer prediction
    pub async fn predict(
        &self,
        request: &RecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        tracing::debug!(?request, "Sending prediction request");

        let response = self
            .http_client
            .post(self.predict_url())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::PredictionService(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::PredictionService(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: RecommendationResponse = response
            .json()
            .await
            .map_err(|e| AppError::PredictionService(format!("Failed to parse response: {}", e)))?;

        Ok(result)
    }
}
