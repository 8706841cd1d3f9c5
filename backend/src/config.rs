//! Configuration management for the Crop Recommender
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::ZeroPolicy;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Locations of the reference table and model artifacts
    pub data: DataConfig,

    /// Form validation behaviour
    pub validation: ValidationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Weather reference table (CSV)
    pub weather_table: String,

    /// Decision forest export (JSON)
    pub model: String,

    /// Label encoder class list (JSON)
    pub label_encoder: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ValidationConfig {
    /// Let a measurement of exactly zero through instead of reporting it as missing
    pub accept_zero_measurements: bool,
}

impl ValidationConfig {
    pub fn zero_policy(&self) -> ZeroPolicy {
        ZeroPolicy::from_accept_zero(self.accept_zero_measurements)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("data.weather_table", "data/weather.csv")?
            .set_default("data.model", "data/model.json")?
            .set_default("data.label_encoder", "data/label_encoder.json")?
            .set_default("validation.accept_zero_measurements", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ prefix)
            .add_source(
                Environment::with_prefix("CROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
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

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            weather_table: "data/weather.csv".to_string(),
            model: "data/model.json".to_string(),
            label_encoder: "data/label_encoder.json".to_string(),
        }
    }
}
