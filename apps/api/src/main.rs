mod config;
mod db;
mod errors;
mod gap_analysis;
mod industry;
mod job_analysis;
mod llm_client;
mod models;
mod optimization;
mod projects;
mod realtime;
mod routes;
mod skills;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::default_providers;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gapwise API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db)
        .await
        .context("Failed to apply database migrations")?;

    // Initialize LLM providers (OpenAI, then Gemini)
    let llm_providers = default_providers(
        config.openai_api_key.clone(),
        config.gemini_api_key.clone(),
        config.llm_timeout,
    )
    .context("Failed to build LLM HTTP clients")?;
    for provider in &llm_providers {
        if provider.is_configured() {
            info!("LLM provider {} enabled (model: {})", provider.name(), provider.model());
        } else {
            warn!("LLM provider {} has no API key; it will be skipped", provider.name());
        }
    }

    // Build app state
    let state = AppState::new(db, llm_providers, config.suggestion_cache_capacity);
    info!(
        "Requirement extraction chain: {}",
        state.requirements_analyzer.provider_names().join(" -> ")
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
