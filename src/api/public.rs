//! Public API types

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::ai::CompletionError;

/// Message sent to clients for every failure to produce a reply
pub const PROCESSING_ERROR: &str = "Failed to process the AI response";

/// Failure envelope returned by the relay
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn new(error: &str, details: &str) -> Self {
        Self {
            error: error.to_string(),
            details: details.to_string(),
        }
    }
}

// Errors

pub enum ApiError {
    /// The request itself is unusable and was never forwarded
    InvalidRequest(String),
    /// Anything that went wrong while producing a reply
    Internal(anyhow::Error),
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidRequest(details) => {
                tracing::warn!("Rejected chat request: {}", details);
                (
                    StatusCode::BAD_REQUEST,
                    axum::Json(ErrorResponse::new("Invalid request", &details)),
                )
                    .into_response()
            }
            ApiError::Internal(err) => {
                // Both completion failure kinds share a wire shape so
                // the kind only shows up in the logs
                match err.downcast_ref::<CompletionError>() {
                    Some(completion_err) => {
                        tracing::error!("{}: {}", completion_err.kind(), completion_err)
                    }
                    None => tracing::error!("{}", err),
                }

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(ErrorResponse::new(PROCESSING_ERROR, &err.to_string())),
                )
                    .into_response()
            }
        }
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

// Re-export public types from each route

pub mod chat {
    pub use crate::api::routes::chat::public::*;
}

pub mod health {
    pub use crate::api::routes::health::public::*;
}
