//! # Mostrador POS Server
//!
//! JSON over HTTP for the browser client.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Browser ──► TraceLayer ──► CorsLayer ──► TimeoutLayer ──► Router       │
//! │                                                              │          │
//! │                                        State<AppState> ◄─────┘          │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                           PosServices (mostrador-db)                    │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                         Arc<dyn Store>: SQLite or memory                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors leave every handler as [`error::ApiError`]:
//! `{ "code": "...", "message": "..." }` with a matching status.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use crate::config::{ConfigError, ServerConfig};
pub use crate::error::{ApiError, ApiResult, ErrorCode};
pub use crate::state::AppState;

/// Full application router with middleware.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(routes::health_router())
        .merge(routes::api_router())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
