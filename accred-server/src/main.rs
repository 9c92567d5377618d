//! accred-server: event accreditation intake and review
//!
//! Long-running HTTP service that:
//! - Accepts public accreditation requests (form and bulk CSV/XLSX upload)
//! - Serves the staff review dashboard (status, zones, export, emails)
//! - Records daily attendance at the venue

mod api;
mod auth;
mod config;
mod db;
mod email;
mod error;
mod import;
mod service;
mod state;

use config::Config;
use error::BoxError;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accred_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        "Starting accred-server (env: {}, event days: {})",
        config.environment,
        config.event_days
    );

    let state = AppState::new(&config).await?;
    let app = api::build_app(state, config.cors_allow_origin.as_deref());

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("accred-server HTTP listening on {http_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("accred-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
