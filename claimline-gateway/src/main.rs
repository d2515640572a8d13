use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use claimline_gateway::providers::OpenAiCompatibleClient;
use claimline_gateway::server;
use claimline_gateway::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = claimline_core::Config::from_env()?;
    let provider_url = config.require_provider_url()?.to_string();

    // Initialize database
    let db = match &config.db_path {
        Some(path) => claimline_db::DbPool::open(path).await?,
        None => claimline_db::DbPool::new().await?,
    };
    info!("Database initialized");

    // Create the chat provider client
    let provider =
        OpenAiCompatibleClient::new(provider_url, config.provider_api_key.clone(), &config.provider_model);
    info!("Chat provider ready (model: {})", config.provider_model);

    let state = Arc::new(AppState::new(db, Arc::new(provider)));
    server::run(state, &config.bind_addr()).await
}
