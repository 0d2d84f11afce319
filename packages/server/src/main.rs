//! Main entry point for the receipt parser API server.

mod app;
mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{build_app, AppState};
use config::Config;
use receipts::{AnthropicModel, ReceiptPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments set the environment directly
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,receipts=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Receipt Parser API");

    let config = Config::from_env().context("Failed to load configuration")?;

    let model = AnthropicModel::new(config.credentials.clone());
    tracing::info!(model = %model.model(), "Model strategy configured");

    let app = build_app(AppState {
        pipeline: Arc::new(ReceiptPipeline::new(model)),
    });

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);
    tracing::info!("Health check: http://localhost:{}/", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
