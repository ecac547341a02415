use std::env;
use std::time::Duration;

/// Model used for every completion request
pub const OPENAI_MODEL: &str = "gpt-4o-mini";

/// Upper bound on the length of a generated reply
pub const MAX_TOKENS: u32 = 150;

/// Origins permitted to call the relay. Matched exactly, never read
/// from the environment.
pub const ALLOWED_ORIGINS: &[&str] = &[
    "https://arminrahbar.github.io",
    "http://localhost:3000",
];

/// Configuration for the relay service
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub max_tokens: u32,
    pub upstream_timeout: Duration,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Build the config from a key lookup so callers can supply values
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_hostname =
            lookup("CHATBOX_LLM_HOST").unwrap_or_else(|| "https://api.openai.com".to_string());
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());

        Self {
            openai_api_hostname,
            openai_api_key,
            openai_model: OPENAI_MODEL.to_string(),
            max_tokens: MAX_TOKENS,
            upstream_timeout: Duration::from_secs(60),
            allowed_origins: ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

/// Configuration for the terminal chat client
#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub relay_url: String,
    pub origin: String,
    pub typing_interval: Duration,
}

impl ChatConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let relay_url =
            lookup("CHATBOX_RELAY_URL").unwrap_or_else(|| "http://localhost:8080/chat".to_string());
        let origin =
            lookup("CHATBOX_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());

        Self {
            relay_url,
            origin,
            typing_interval: Duration::from_millis(50),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}
