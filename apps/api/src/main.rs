mod applications;
mod ats;
mod config;
mod db;
mod errors;
mod extract;
mod generation;
mod llm_client;
mod models;
mod ranking;
mod recruiter;
mod routes;
mod skill_craft;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{GeminiClient, OpenAiClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

/// Connection-level cap for provider calls. Per-call timeouts come from AI_TIMEOUT_SECS.
const HTTP_CLIENT_TIMEOUT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting JobPilot API v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.app_env
    );

    // Initialize PostgreSQL (runs embedded migrations)
    let db = create_pool(&config.database_url).await?;
    info!("Database pool ready");

    // One HTTP client shared by every provider
    let http = reqwest::Client::builder()
        .timeout(HTTP_CLIENT_TIMEOUT)
        .build()?;

    let content_generator: Option<Arc<dyn TextGenerator>> = match &config.openai_api_key {
        Some(key) => {
            info!("OpenAI client initialized (model: {})", llm_client::openai::MODEL);
            Some(Arc::new(OpenAiClient::new(http.clone(), key.clone())))
        }
        None => {
            warn!("OPENAI_API_KEY not set. Content generation will report not configured.");
            None
        }
    };

    let scoring_generator: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
        Some(key) => {
            info!("Gemini client initialized (model: {})", llm_client::gemini::MODEL);
            Some(Arc::new(GeminiClient::new(http.clone(), key.clone())))
        }
        None => {
            warn!("GEMINI_API_KEY not set. Ranking will use skills-overlap scoring.");
            None
        }
    };

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        content_generator,
        scoring_generator,
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
