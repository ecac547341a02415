//! Router for the chat API

use std::sync::Arc;

use axum::{Router, extract::State, routing::post};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Relay a single message to the completion provider. No history is
/// kept between calls.
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> Result<axum::Json<public::ChatResponse>, ApiError> {
    if payload.message.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "message must not be empty".to_string(),
        ));
    }

    tracing::debug!("Received message: {}", payload.message);

    let generated_text = state.provider.complete(&payload.message).await?;

    tracing::debug!(
        "Provider {} replied with {} chars",
        state.provider.name(),
        generated_text.chars().count()
    );

    Ok(axum::Json(public::ChatResponse::new(&generated_text)))
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/chat", post(chat_handler))
}
