//! HTTP API layer for the Nonprofit Search page.
//!
//! - `GET /search` — organization search used by the page's search form
//! - `GET /api/states` — location codes for the state filter
//! - `GET /health` — load status
//!
//! Static file serving and middleware are added by the server binary.

pub mod api;

use std::sync::Arc;
use std::time::Instant;

use axum::{routing::get, Router};

use nonprofit_search_core::types::NonprofitIndex;

/// Axum application state. The index is immutable once loaded.
#[derive(Clone)]
pub struct AppContext {
    pub index: Arc<NonprofitIndex>,
    pub start_time: Instant,
}

impl AppContext {
    pub fn new(index: NonprofitIndex) -> Self {
        Self { index: Arc::new(index), start_time: Instant::now() }
    }
}

/// API routes with state applied.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/search", get(api::api_search))
        .route("/api/states", get(api::api_states))
        .route("/health", get(api::api_health))
        .with_state(ctx)
}
