//! Router for the liveness probe

use std::sync::Arc;

use axum::{Router, routing::get};

use super::public::HealthResponse;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn health_handler() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse::default())
}

pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(health_handler))
}
