use anyhow::Context;
use tracing_subscriber::EnvFilter;

use doc_summarizer::config::AppConfig;
use doc_summarizer::routes;
use doc_summarizer::services::summarizer;
use doc_summarizer::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded (env: {})", std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into()));

    let summarizer =
        summarizer::from_config(&config.summarizer).context("Failed to initialize summarizer")?;
    tracing::info!("Summarizer ready: {}", summarizer.describe());

    let state = AppState::new(config.clone(), summarizer);
    let app = routes::app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
