mod config;
mod embedding;
mod errors;
mod evaluation;
mod extraction;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::build_embedder;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Relevance API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize embedding backend (model weights load lazily unless EAGER_MODEL_LOAD)
    let embedder = build_embedder(&config)?;
    info!(
        "Embedding backend initialized (model: {}, dim: {})",
        embedder.model_name(),
        embedder.dimension()
    );
    if config.eager_model_load {
        embedder.warm_up().await?;
    }

    info!(
        "Skill matching: {:?}, upload limit {} bytes",
        config.skill_match_mode, config.max_upload_bytes
    );

    let state = AppState {
        config: config.clone(),
        embedder,
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
