//! Configuration management for the Ignis backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with IGNIS_ prefix
//!    (e.g. `IGNIS_DATABASE__URL`, `IGNIS_FIRMS__API_KEY`)
//!
//! Secrets and the store URL have no defaults; loading fails when any of
//! them is missing.

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// Settings shared by all upstream HTTP clients
    pub upstream: UpstreamConfig,

    /// NASA FIRMS area API
    pub firms: FirmsConfig,

    /// NOAA api.weather.gov
    pub noaa: NoaaConfig,

    /// Mapbox terrain tiles
    pub mapbox: MapboxConfig,

    pub human_factors: HumanFactorsConfig,

    /// External fire-spread predictor
    pub predictor: PredictorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Allowed CORS origin; `*` allows any
    pub cors_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Seconds to wait for a pooled connection
    pub acquire_timeout_secs: u64,

    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// User-Agent sent to every provider (NOAA requires one)
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FirmsConfig {
    pub base_url: String,

    /// FIRMS map key
    pub api_key: String,

    /// Sensor product, e.g. VIIRS_NOAA21_NRT
    pub source: String,

    /// west,south,east,north
    pub bbox: String,

    /// Days of data per query (1-10)
    pub day_range: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NoaaConfig {
    pub base_url: String,

    /// Point used when the request carries none
    pub default_latitude: f64,
    pub default_longitude: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapboxConfig {
    pub base_url: String,

    pub access_token: String,

    /// Point used when the request carries none
    pub default_latitude: f64,
    pub default_longitude: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HumanFactorsConfig {
    /// Source proxied by `GET /api/human-factors`
    pub api_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictorConfig {
    /// Executable, e.g. python3
    pub command: String,

    /// Arguments placed before the JSON payload, e.g. the script path
    pub args: Vec<String>,

    /// Working directory for the child process
    pub working_dir: Option<String>,

    /// Maximum concurrently running predictor processes
    pub max_concurrent: usize,

    /// Wall-clock limit per prediction in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("IGNIS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.cors_origin", "*")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("upstream.user_agent", "ignis-ai")?
            .set_default("upstream.timeout_secs", 30)?
            .set_default("firms.base_url", "https://firms.modaps.eosdis.nasa.gov")?
            .set_default("firms.source", "VIIRS_NOAA21_NRT")?
            .set_default("firms.bbox", "-125.0,24.0,-66.0,49.0")?
            .set_default("firms.day_range", 2)?
            .set_default("noaa.base_url", "https://api.weather.gov")?
            .set_default("noaa.default_latitude", 34.0522)?
            .set_default("noaa.default_longitude", -118.2437)?
            .set_default("mapbox.base_url", "https://api.mapbox.com")?
            .set_default("mapbox.default_latitude", 34.0522)?
            .set_default("mapbox.default_longitude", -118.2437)?
            .set_default("predictor.command", "python3")?
            .set_default("predictor.args", vec!["ml/predict_spread.py"])?
            .set_default("predictor.max_concurrent", 4)?
            .set_default("predictor.timeout_secs", 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (IGNIS_ prefix)
            .add_source(
                Environment::with_prefix("IGNIS")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("predictor.args")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
            cors_origin: "*".to_string(),
        }
    }
}
