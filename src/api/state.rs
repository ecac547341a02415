use crate::ai::BoxedProvider;
use crate::core::AppConfig;

use super::origin::OriginAllowList;

/// Read-only state shared by every request. Nothing in here changes
/// after startup so requests never contend on it.
pub struct AppState {
    pub provider: BoxedProvider,
    pub origins: OriginAllowList,
}

impl AppState {
    pub fn new(config: &AppConfig, provider: BoxedProvider) -> Self {
        Self {
            provider,
            origins: OriginAllowList::new(&config.allowed_origins),
        }
    }
}
