//! Configuration management for the AgriSense platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::RequestDefaults;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Prediction service configuration
    pub prediction: PredictionConfig,

    /// Trend series configuration
    pub trend: TrendConfig,

    /// Fallback values for recommendation requests
    pub recommendation: RequestDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionConfig {
    /// Base URL of the prediction service; requests go to `{base_url}/predict`
    pub base_url: String,

    /// Request timeout in seconds. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrendConfig {
    /// Upper bound for requested trend days
    pub max_days: usize,

    /// Fixed seed for the synthetic generator
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let defaults = RequestDefaults::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("prediction.base_url", "http://127.0.0.1:8000")?
            .set_default("trend.max_days", 90)?
            .set_default("recommendation.nitrogen", defaults.nitrogen)?
            .set_default("recommendation.phosphorus", defaults.phosphorus)?
            .set_default("recommendation.potassium", defaults.potassium)?
            .set_default("recommendation.temperature", defaults.temperature)?
            .set_default("recommendation.humidity", defaults.humidity)?
            .set_default("recommendation.moisture", defaults.moisture)?
            .set_default("recommendation.soil_type", defaults.soil_type)?
            .set_default("recommendation.crop_type", defaults.crop_type)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            prediction: PredictionConfig::default(),
            trend: TrendConfig::default(),
            recommendation: RequestDefaults::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            max_days: 90,
            seed: None,
        }
    }
}
