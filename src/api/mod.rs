//! Local control API
//!
//! Stands in for the timer window: each endpoint maps to one UI event and is
//! forwarded to the driver task.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timers/:index/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/focus", post(focus_handler))
        .route("/entries", get(list_entries_handler).post(add_entry_handler))
        .route(
            "/entries/:index",
            patch(edit_entry_handler).delete(delete_entry_handler),
        )
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
