//! Test utilities for integration tests
#![allow(dead_code)]
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{Router, body::Body};

use chatbox::ai::{CompletionError, CompletionProvider};
use chatbox::api::AppState;
use chatbox::api::app;
use chatbox::core::AppConfig;

pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DISALLOWED_ORIGIN: &str = "https://evil.example.com";

/// What the stub provider does when called
#[derive(Clone)]
pub enum StubReply {
    Text(String),
    CallFailure(String),
    Invalid(String),
}

/// Completion provider that answers from a script and counts how
/// often it was called.
pub struct StubProvider {
    reply: StubReply,
    calls: AtomicUsize,
    prompts: std::sync::Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: std::sync::Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::CallFailure(msg) => Err(CompletionError::UpstreamCallFailure(msg.clone())),
            StubReply::Invalid(msg) => Err(CompletionError::InvalidUpstreamResponse(msg.clone())),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Creates a test application router backed by `provider`.
pub fn test_app(provider: Arc<StubProvider>) -> Router {
    let app_config = AppConfig {
        openai_api_hostname: String::from("http://127.0.0.1:9"),
        openai_api_key: Some(String::from("test-api-key")),
        openai_model: String::from("gpt-4o-mini"),
        max_tokens: 150,
        upstream_timeout: std::time::Duration::from_secs(5),
        allowed_origins: vec![
            String::from("https://arminrahbar.github.io"),
            String::from(ALLOWED_ORIGIN),
        ],
    };
    let app_state = AppState::new(&app_config, provider);
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf8")
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    let body = body_to_string(body).await;
    serde_json::from_str(&body).expect("Body is not json")
}

pub fn chat_request(origin: Option<&str>, message: &str) -> http::Request<Body> {
    let mut builder = http::Request::builder()
        .uri("/chat")
        .method("POST")
        .header("content-type", "application/json");
    if let Some(origin) = origin {
        builder = builder.header("origin", origin);
    }
    builder
        .body(Body::from(
            serde_json::json!({ "message": message }).to_string(),
        ))
        .unwrap()
}
