//! Aria companion handlers: welcome, turn, and finalize.

use std::sync::Arc;

use aria_config::{CHAT_LOG_COLLECTION, COMPANION_PERSONA, WELCOME_PERSONA};
use aria_core::{GreetingRequest, HistoryScope, TurnContext};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{error, info};

use crate::dto::{MessageResponse, TurnRequest, FINALIZE_FAILED, FINALIZE_OK};
use crate::error::AppError;
use crate::handlers::timestamp;
use crate::ServerState;

fn persona_script(state: &ServerState, id: &str) -> Result<String, AppError> {
    state
        .personas
        .script(id)
        .map(str::to_string)
        .map_err(|e| {
            error!("Persona lookup failed: {}", e);
            AppError::Internal(e.to_string())
        })
}

/// Opening message for a user, returned exactly as the generator produced it.
pub async fn welcome(
    State(state): State<Arc<ServerState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    info!("[{}] Welcome requested ({})", user_id, state.namespace);

    let request = GreetingRequest {
        namespace: state.namespace.clone(),
        collection: CHAT_LOG_COLLECTION.to_string(),
        user_id,
        system_message: persona_script(&state, WELCOME_PERSONA)?,
        timestamp: timestamp(),
    };

    let response = state.responder.initial_greeting(request).await?;
    Ok(Json(response))
}

/// One companion turn. The stored turn number is the client's `turn_id + 1`.
pub async fn turn(
    State(state): State<Arc<ServerState>>,
    Path((user_id, chat_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let req = TurnRequest::from_body(&body)?;
    let chat_id: i64 = chat_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("chat_id must be an integer, got '{}'", chat_id)))?;
    let turn_id = req
        .turn_id
        .checked_add(1)
        .ok_or_else(|| AppError::BadRequest("turn_id is out of range".into()))?;

    info!("[{}] Chat {} turn {}", user_id, chat_id, turn_id);

    let context = TurnContext {
        namespace: state.namespace.clone(),
        collection: CHAT_LOG_COLLECTION.to_string(),
        system_message: persona_script(&state, COMPANION_PERSONA)?,
        prompt: req.prompt,
        user_id,
        chat_id,
        turn_id,
        timestamp: timestamp(),
        scope: HistoryScope::All,
    };

    let response = state.responder.agent_response(context).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Closes a chat.
pub async fn finalize(
    State(state): State<Arc<ServerState>>,
    Path((user_id, chat_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    info!("Finalizing chat {} for user {}", chat_id, user_id);

    state
        .responder
        .finalize_chat(&state.namespace, &user_id, &chat_id)
        .await
        .map_err(|e| {
            error!("Error during finalizing chat: {}", e);
            AppError::Internal(FINALIZE_FAILED.into())
        })?;

    Ok(Json(MessageResponse::new(FINALIZE_OK)))
}
