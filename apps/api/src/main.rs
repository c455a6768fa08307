use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quill::config::Config;
use quill::db::create_pool;
use quill::llm_client::{self, LlmClient};
use quill::signup::repository::{InMemoryUserRepository, PgUserRepository, UserRepository};
use quill::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Quill API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; generation requests will fail at the provider");
    }
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!(
        "LLM client initialized (model: {}, base_url: {})",
        llm_client::MODEL,
        config.openai_base_url
    );

    // Initialize user store
    let users: Arc<dyn UserRepository> = match &config.database_url {
        Some(url) => {
            let repo = PgUserRepository::new(create_pool(url).await?);
            repo.ensure_schema().await?;
            Arc::new(repo)
        }
        None => {
            warn!("DATABASE_URL is not set; accounts are kept in memory only");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let state = AppState { llm, users };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the form is served from its own domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
