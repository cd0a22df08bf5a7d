//! Cosmic Works sales assistant handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;
use uuid::Uuid;

use crate::dto::{CosmicWorksRequest, MessageResponse};
use crate::error::{ApiJson, AppError};
use crate::ServerState;

/// Runs one turn of the session's Cosmic Works agent.
pub async fn run(
    State(state): State<Arc<ServerState>>,
    ApiJson(req): ApiJson<CosmicWorksRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let request_id = Uuid::new_v4();
    info!(
        "[{}] - [{}] POST /ai/cosmic_works: {}...",
        request_id,
        req.session_id,
        req.prompt.get(..50).unwrap_or(&req.prompt)
    );

    let agent = state.agents.get_or_create(&req.session_id)?;
    let reply = agent.run(&req.prompt).await?;

    Ok(Json(MessageResponse::new(reply)))
}
