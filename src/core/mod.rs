mod config;
pub use config::{ALLOWED_ORIGINS, AppConfig, ChatConfig, MAX_TOKENS, OPENAI_MODEL};
