//! Ignis wildfire data backend server

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ignis_backend::{
    create_app, db, external::build_http_client, services::SubprocessPredictor, AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ignis_server=debug,ignis_backend=debug,tower_http=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load().context("failed to load configuration")?;

    tracing::info!("Starting Ignis backend");
    tracing::info!("Environment: {}", config.environment);

    let db_pool = db::connect(&config.database)
        .await
        .context("failed to initialise database")?;

    let http = build_http_client(&config.upstream).context("failed to build HTTP client")?;
    let predictor = SubprocessPredictor::new(&config.predictor);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;

    // Create application state
    let state = AppState {
        db: db_pool,
        config: Arc::new(config),
        http,
        predictor: Arc::new(predictor),
    };

    let app = create_app(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
