//! API routes module

pub mod chat;
pub mod health;

use std::sync::Arc;

use axum::{Router, middleware};

use crate::api::origin::require_allowed_origin;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        // Liveness probe, open to any caller
        .merge(health::router())
        // Chat relay, only for allow-listed origins
        .merge(
            chat::router()
                .route_layer(middleware::from_fn_with_state(state, require_allowed_origin)),
        )
}
