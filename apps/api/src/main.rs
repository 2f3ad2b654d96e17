mod config;
mod errors;
mod models;
mod people_client;
mod routes;
mod scoring;
mod selection;
mod state;
mod views;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::people_client::PeopleClient;
use crate::routes::build_router;
use crate::selection::SelectionStore;
use crate::state::AppState;
use crate::views::matrix::MatrixCache;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting compare API v{}", env!("CARGO_PKG_VERSION"));

    let people = PeopleClient::new(
        &config.people_api_url,
        Duration::from_secs(config.people_api_timeout_secs),
    )?;
    info!("Candidate API client initialized ({})", config.people_api_url);

    let state = AppState {
        people: Arc::new(people),
        selection: SelectionStore::new(),
        matrix_cache: MatrixCache::new(),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
