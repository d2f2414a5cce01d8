mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod recommendations;
mod render;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::LlmExtractor;
use crate::llm_client::LlmClient;
use crate::recommendations::RecommendationFetcher;
use crate::render::HtmlReportRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skillgap API v{}", env!("CARGO_PKG_VERSION"));

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tokio::fs::create_dir_all(&config.report_dir).await?;
    info!(
        "Storage: uploads in {}, reports in {}",
        config.upload_dir.display(),
        config.report_dir.display()
    );

    // Initialize LLM client for document extraction
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_model.clone())?;
    info!("LLM client initialized (model: {})", llm.model());

    // Initialize recommendation provider chain
    let fetcher = RecommendationFetcher::with_default_providers(
        config.provider_timeout,
        config.fetch_policy(),
    )?;
    info!(
        "Course providers: {} (timeout {:?})",
        fetcher.provider_names().join(" -> "),
        config.provider_timeout
    );

    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(LlmExtractor::new(llm)),
        fetcher: Arc::new(fetcher),
        renderer: Arc::new(HtmlReportRenderer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
