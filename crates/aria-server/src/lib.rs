//! HTTP server for the Cosmic Works assistant and the Aria companion.
//!
//! [`router`] wires the routes onto a shared [`ServerState`]; the binary in
//! `main.rs` builds that state from the environment.

pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use aria_config::PersonaRegistry;
use aria_core::ResponseGenerator;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::services::AgentRegistry;

/// Shared server state accessible from all handlers.
pub struct ServerState {
    /// Cosmic Works agents keyed by session ID.
    pub agents: AgentRegistry,
    /// Companion greeting and turn generator.
    pub responder: Arc<dyn ResponseGenerator>,
    pub personas: PersonaRegistry,
    /// Deployment namespace, e.g. `mental-health-production`.
    pub namespace: String,
}

/// Builds the application router.
pub fn router(state: Arc<ServerState>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/ai/cosmic_works", post(handlers::cosmic_works::run))
        .route("/ai/mental_health/welcome/{user_id}", post(handlers::mental_health::welcome))
        .route("/ai/mental_health/{user_id}/{chat_id}", post(handlers::mental_health::turn))
        .route(
            "/ai/mental_health/finalize/{user_id}/{chat_id}",
            post(handlers::mental_health::finalize),
        )
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state)
}
