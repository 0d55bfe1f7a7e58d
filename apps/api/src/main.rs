mod auth;
mod config;
mod errors;
mod llm_client;
mod routes;
mod scan;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, ModelClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AI Visibility Scanner v{}", env!("CARGO_PKG_VERSION"));

    // The service still starts without a key so /health can report it.
    let llm: Option<Arc<dyn ModelClient>> = match GeminiClient::from_config(&config) {
        Some(client) => {
            info!("Gemini client initialized (model: {})", client.model());
            let client: Arc<dyn ModelClient> = Arc::new(client);
            Some(client)
        }
        None => {
            warn!("GEMINI_API_KEY is not set; scan endpoints will fail until it is configured");
            None
        }
    };

    if config.api_secret == config::DEFAULT_API_SECRET {
        warn!("API_SECRET_KEY is not set; using the built-in development secret");
    }

    let port = config.port;
    let state = AppState::new(config, llm);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
