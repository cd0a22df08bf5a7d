//! HTTP route handlers for the agent server.

use axum::http::{Method, Uri};

use crate::error::AppError;

pub mod cosmic_works;
pub mod mental_health;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Fallback for unknown routes.
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {} {}", method, uri.path()))
}

/// Current local time as an RFC 3339 timestamp.
pub(crate) fn timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}
