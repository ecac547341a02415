use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ai::{CompletionError, CompletionProvider};
use crate::core::AppConfig;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
}

// {
//     "id": "chatcmpl-123",
//     "choices": [{
//         "index": 0,
//         "message": { "role": "assistant", "content": "Hello!" },
//         "finish_reason": "stop"
//     }]
// }
#[derive(Deserialize, Debug)]
pub struct CompletionResponse {
    // Some OpenAI compatible servers leave this out entirely instead
    // of sending an empty list
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice with surrounding whitespace removed.
    pub fn into_text(self) -> Result<String, CompletionError> {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::InvalidUpstreamResponse(
                    "Invalid response structure from AI".to_string(),
                )
            })?;

        let text = content.trim();
        if text.is_empty() {
            return Err(CompletionError::InvalidUpstreamResponse(
                "Empty completion content from AI".to_string(),
            ));
        }

        Ok(text.to_string())
    }
}

/// Request a single, non-streaming completion from an OpenAI
/// compatible API.
pub async fn completion(
    messages: Vec<Message>,
    api_hostname: &str,
    api_key: &str,
    model: &str,
    max_tokens: u32,
    timeout: Duration,
) -> Result<CompletionResponse, CompletionError> {
    let payload = CompletionRequest {
        model,
        messages,
        max_tokens,
    };
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(timeout)
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .json::<CompletionResponse>()
        .await?;

    Ok(response)
}

/// Completion provider backed by the OpenAI chat completions API or
/// anything that speaks the same protocol.
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    api_hostname: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_hostname: config.openai_api_hostname.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            max_tokens: config.max_tokens,
            timeout: config.upstream_timeout,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CompletionError::UpstreamCallFailure("Missing OPENAI_API_KEY".to_string())
        })?;

        let messages = vec![Message::new(Role::User, prompt)];
        let response = completion(
            messages,
            &self.api_hostname,
            api_key,
            &self.model,
            self.max_tokens,
            self.timeout,
        )
        .await?;

        response.into_text()
    }

    fn name(&self) -> &str {
        "openai"
    }
}
