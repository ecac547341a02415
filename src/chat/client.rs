//! HTTP client for the relay's chat endpoint.
use http::header;
use serde_json::Value;

use crate::api::public::chat::ChatRequest;
use crate::core::ChatConfig;

#[derive(Debug, thiserror::Error)]
pub enum RelayClientError {
    #[error("Failed to reach the relay: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Failed to fetch with status: {0}")]
    Status(u16),
    #[error("Malformed response body: {0}")]
    MalformedBody(#[source] reqwest::Error),
    #[error("Unexpected response structure")]
    UnexpectedResponse,
}

#[derive(Clone, Debug)]
pub struct RelayClient {
    http: reqwest::Client,
    relay_url: String,
    origin: String,
}

impl RelayClient {
    pub fn new(relay_url: &str, origin: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            relay_url: relay_url.to_string(),
            origin: origin.to_string(),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(&config.relay_url, &config.origin)
    }

    /// Send one message and return the generated reply text
    pub async fn send(&self, message: &str) -> Result<String, RelayClientError> {
        let payload = ChatRequest {
            message: message.to_string(),
        };
        let response = self
            .http
            .post(&self.relay_url)
            .header(header::ORIGIN, &self.origin)
            .json(&payload)
            .send()
            .await
            .map_err(RelayClientError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayClientError::Status(status.as_u16()));
        }

        // Read loosely so a missing field is reported as an unexpected
        // structure rather than a decoding failure
        let body: Value = response
            .json()
            .await
            .map_err(RelayClientError::MalformedBody)?;
        tracing::debug!("Full response data: {}", body);

        match body["generated_text"].as_str() {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(RelayClientError::UnexpectedResponse),
        }
    }
}
