//! Public types for the chat API
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatRequest {
    // Missing and empty are rejected the same way by the handler
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ChatResponse {
    pub generated_text: String,
}

impl ChatResponse {
    pub fn new(generated_text: &str) -> Self {
        Self {
            generated_text: generated_text.into(),
        }
    }
}
