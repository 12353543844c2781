//! External API integrations

pub mod firms;
pub mod human_factors;
pub mod mapbox;
pub mod noaa;

use std::time::Duration;

use reqwest::Client;

use crate::config::UpstreamConfig;

pub use firms::FirmsClient;
pub use human_factors::HumanFactorsClient;
pub use mapbox::TerrainClient;
pub use noaa::NoaaClient;

/// Build the HTTP client shared by all upstream integrations.
///
/// Every request carries the configured User-Agent and is bounded by the
/// configured timeout.
pub fn build_http_client(config: &UpstreamConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
}
