mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod schema;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::template::Template;
use crate::render::ResumeRenderer;
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

    info!("Starting resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())
        .context("Failed to build HTTP client for the content generator")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Template is fixed for the process lifetime
    let template = Template::classic(config.page_size).with_max_pages(config.max_pages);
    template
        .check()
        .map_err(anyhow::Error::msg)
        .context("Invalid render template")?;
    info!(
        "Render template: {:?}, {}% / {}% columns, max {} pages, timeout {}s",
        template.page,
        template.left_width_pct,
        template.right_width_pct(),
        template.max_pages,
        config.render_timeout.as_secs()
    );

    let state = AppState {
        generator: Arc::new(llm),
        renderer: Arc::new(ResumeRenderer::new(template)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
