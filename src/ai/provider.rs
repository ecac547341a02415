//! The seam between the relay and whichever completion provider backs
//! it.
use std::sync::Arc;

use async_trait::async_trait;

/// Failures talking to a completion provider. Both kinds surface to
/// clients with the same wire shape and only differ in how they are
/// logged.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Network or transport error, non-2xx status, undecodable body or
    /// missing credential.
    #[error("{0}")]
    UpstreamCallFailure(String),
    /// The provider replied but without a usable completion.
    #[error("{0}")]
    InvalidUpstreamResponse(String),
}

impl CompletionError {
    /// Stable name of the failure kind for logs
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::UpstreamCallFailure(_) => "UpstreamCallFailure",
            CompletionError::InvalidUpstreamResponse(_) => "InvalidUpstreamResponse",
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::UpstreamCallFailure(err.to_string())
    }
}

/// Anything that can turn a single prompt into a single reply. No
/// prior conversation is ever attached.
#[async_trait]
pub trait CompletionProvider {
    /// Returns the reply trimmed of surrounding whitespace. Never
    /// returns an empty string.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

pub type BoxedProvider = Arc<dyn CompletionProvider + Send + Sync + 'static>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_names() {
        let call = CompletionError::UpstreamCallFailure("connection refused".into());
        let invalid = CompletionError::InvalidUpstreamResponse("no choices".into());
        assert_eq!(call.kind(), "UpstreamCallFailure");
        assert_eq!(invalid.kind(), "InvalidUpstreamResponse");
        assert_eq!(invalid.to_string(), "no choices");
    }
}
