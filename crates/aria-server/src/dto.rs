//! Data transfer objects for HTTP message serialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Message returned when the turn route receives no usable body.
pub const NO_DATA_PROVIDED: &str = "No data provided";

/// Message returned when closing a chat fails.
pub const FINALIZE_FAILED: &str = "Failed to finalize chat";

/// Message returned after a chat is closed.
pub const FINALIZE_OK: &str = "Chat session finalized successfully";

/// Request body for the Cosmic Works agent.
#[derive(Debug, Deserialize)]
pub struct CosmicWorksRequest {
    pub session_id: String,
    pub prompt: String,
}

/// Request body for a companion turn.
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub prompt: String,
    pub turn_id: i64,
}

impl TurnRequest {
    /// Parses a raw turn body.
    ///
    /// A missing body, or a JSON value with no content (`null`, `{}`, `[]`,
    /// `""`, `0`, `false`), is rejected with [`NO_DATA_PROVIDED`].
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::BadRequest(NO_DATA_PROVIDED.into()));
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;
        if is_blank(&value) {
            return Err(AppError::BadRequest(NO_DATA_PROVIDED.into()));
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::BadRequest(format!("Invalid turn request: {}", e)))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// `{ "message": ... }` envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
