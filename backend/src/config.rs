//! Configuration management for the Crop Advisory Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROPADV_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Login credentials accepted by the demo login view
    pub auth: AuthConfig,

    /// Classifier and scaler artifact locations
    pub artifacts: ArtifactConfig,

    /// Geolocation lookup configuration
    pub geolocation: GeolocationConfig,

    /// Generative-text service configuration
    pub generative: GenerativeConfig,

    /// Monitoring view configuration
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactConfig {
    /// Path to the feature-scaler artifact
    pub scaler_path: String,

    /// Path to the trained classifier artifact
    pub model_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeolocationConfig {
    /// IP geolocation endpoint
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerativeConfig {
    /// Generative-text API endpoint
    pub api_endpoint: String,

    /// Generative-text API key
    pub api_key: String,

    /// Model identifier to request
    pub model: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitoringConfig {
    /// Seed for the process-wide telemetry random source. Set once at
    /// startup; successive monitoring renders advance the generator.
    pub seed: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROPADV_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("auth.username", "aa")?
            .set_default("auth.password", "aa")?
            .set_default("artifacts.scaler_path", "model/scaler.json")?
            .set_default("artifacts.model_path", "model/model.json")?
            .set_default("geolocation.base_url", "http://ip-api.com")?
            .set_default(
                "generative.api_endpoint",
                "https://generativelanguage.googleapis.com",
            )?
            .set_default("generative.api_key", "")?
            .set_default("generative.model", "gemini-1.5-pro")?
            .set_default("monitoring.seed", 42)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROPADV_ prefix)
            .add_source(
                Environment::with_prefix("CROPADV")
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
