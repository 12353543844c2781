//! Database pool setup

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

/// Open the connection pool and apply embedded migrations when enabled.
///
/// Any failure here is fatal to startup.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await?;

    tracing::info!("Database connection established");

    if config.run_migrations {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations completed");
    }

    Ok(pool)
}
