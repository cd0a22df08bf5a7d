//! HTTP server entry point.
//!
//! Loads settings and personas, opens the chat log, builds the agents, and
//! serves the router.

use std::sync::Arc;

use anyhow::{Context, Result};
use aria_agents::{ChatModel, CompanionResponder, CosmicWorksFactory};
use aria_config::{PersonaRegistry, Settings};
use aria_llm::LlmClient;
use aria_server::db::{self, SqliteChatLog};
use aria_server::services::AgentRegistry;
use aria_server::{router, ServerState};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let settings = Settings::from_env().context("invalid settings")?;
    let state = Arc::new(init_server_state(&settings)?);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state).layer(cors);

    info!("Starting server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the shared state: personas, chat log, model client, and agents.
fn init_server_state(settings: &Settings) -> Result<ServerState> {
    let personas = PersonaRegistry::with_defaults()
        .merge_dir(&settings.personas_dir)
        .unwrap_or_else(|e| {
            warn!("Persona directory unavailable, using built-ins: {}", e);
            PersonaRegistry::with_defaults()
        });
    info!("Loaded {} personas", personas.ids().len());

    let conn = db::init_db(&settings.database_url)?;
    let chat_log = Arc::new(SqliteChatLog::new(conn));

    let model: Arc<dyn ChatModel> = Arc::new(LlmClient::new(&settings.model, settings.api_base.as_deref()));
    info!("Using model {}", settings.model);

    let namespace = settings.namespace();
    info!("Namespace: {}", namespace);
    match settings.max_sessions {
        Some(max) => info!("Max sessions: {}", max),
        None => info!("Max sessions: unlimited"),
    }

    Ok(ServerState {
        agents: AgentRegistry::new(Arc::new(CosmicWorksFactory::new(model.clone())), settings.max_sessions),
        responder: Arc::new(CompanionResponder::new(model, chat_log)),
        personas,
        namespace,
    })
}
