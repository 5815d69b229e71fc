mod companion;
mod config;
mod errors;
mod ingest;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::store::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Companion API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize inference client
    let llm = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_base.clone(),
        Duration::from_secs(config.inference_timeout_secs),
    )?;
    info!(
        "Inference client initialized (study model: {}, review model: {})",
        config.study_model, config.review_model
    );

    let state = AppState::new(config.clone(), Arc::new(llm));
    spawn_idle_sweeper(
        state.sessions.clone(),
        Duration::from_secs(config.session_idle_ttl_secs),
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Ends sessions nobody has touched for `max_idle`. Checks once a minute.
fn spawn_idle_sweeper(sessions: SessionStore, max_idle: Duration) {
    let Ok(max_idle) = chrono::Duration::from_std(max_idle) else {
        tracing::warn!("Session idle TTL out of range; idle sessions will not be evicted");
        return;
    };
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(60));
        loop {
            ticker.tick().await;
            sessions.evict_idle(max_idle).await;
        }
    });
}
