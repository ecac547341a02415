//! Cross-origin policy for the relay.
//!
//! Two pieces cooperate here. The `CorsLayer` only ever echoes back
//! origins from the allow-list so browsers block responses for
//! everyone else. Since CORS alone does not stop the request from
//! running, `require_allowed_origin` also rejects any request whose
//! `Origin` is not an exact member of the list before the handler
//! runs.
use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{HeaderValue, Method, StatusCode, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::public::ErrorResponse;
use super::state::AppState;

#[derive(Clone, Debug, Default)]
pub struct OriginAllowList {
    origins: HashSet<String>,
}

impl OriginAllowList {
    pub fn new<S: AsRef<str>>(origins: &[S]) -> Self {
        Self {
            origins: origins.iter().map(|o| o.as_ref().to_string()).collect(),
        }
    }

    /// Exact set membership. No wildcards, no suffix or prefix
    /// matching, and a missing `Origin` is never allowed.
    pub fn allows(&self, origin: Option<&HeaderValue>) -> bool {
        origin
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| self.origins.contains(value))
    }

    /// CORS headers for the allowed origins only
    pub fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .origins
            .iter()
            .filter_map(|o| HeaderValue::from_str(o).ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Middleware rejecting requests from origins not on the allow-list
pub async fn require_allowed_origin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(header::ORIGIN);
    if state.origins.allows(origin) {
        return next.run(request).await;
    }

    let origin = origin
        .and_then(|o| o.to_str().ok())
        .unwrap_or("<none>")
        .to_string();
    tracing::warn!("CorsRejected: origin {} is not allowed to call {}", origin, request.uri());

    (
        StatusCode::FORBIDDEN,
        axum::Json(ErrorResponse::new(
            "Origin not allowed",
            &format!("Origin {} is not allowed by CORS", origin),
        )),
    )
        .into_response()
}
