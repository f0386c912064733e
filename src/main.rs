//! Sentiment Chat - keyword sentiment tagging around a hosted LLM
//!
//! Each submission runs through a fixed pipeline (trim, classify, respond,
//! log) and the session history is served over a small HTTP API.

mod api;
mod history;
mod llm;
mod pipeline;

use api::{create_router, AppState};
use llm::LlmConfig;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentiment_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    let port: u16 = std::env::var("SENTIMENT_CHAT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let llm_config = LlmConfig::from_env();
    let state = AppState::new(&llm_config);

    if state.pipeline.is_some() {
        tracing::info!(
            model = %llm_config.model,
            temperature = llm_config.temperature,
            endpoint = %llm_config.base_url,
            "LLM provider initialized"
        );
    } else {
        tracing::warn!("No LLM API key configured. Set GROQ_API_KEY.");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Sentiment chat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
