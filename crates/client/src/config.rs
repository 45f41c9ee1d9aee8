use std::env;

use crate::prefs::PrefsStore;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const BASE_URL_ENV: &str = "CASEMAP_API_URL";

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Resolve the base URL: explicit override, then the persisted
    /// preference, then the environment, then the default.
    pub async fn resolve(override_url: Option<&str>, prefs: &PrefsStore) -> Self {
        if let Some(url) = override_url {
            return Self::new(url);
        }
        if let Ok(Some(url)) = prefs.get(crate::prefs::API_BASE_URL_KEY).await {
            if !url.trim().is_empty() {
                return Self::new(url);
            }
        }
        if let Ok(url) = env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                return Self::new(url);
            }
        }
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiConfig;
    use crate::prefs::{PrefsStore, API_BASE_URL_KEY};

    #[tokio::test]
    async fn explicit_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = PrefsStore::new(dir.path().join("prefs.json"));
        prefs.set(API_BASE_URL_KEY, "http://from-prefs").await.unwrap();

        let config = ApiConfig::resolve(Some("http://override"), &prefs).await;
        assert_eq!(config.base_url, "http://override");
    }

    #[tokio::test]
    async fn prefs_value_beats_default() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = PrefsStore::new(dir.path().join("prefs.json"));
        prefs.set(API_BASE_URL_KEY, "http://from-prefs").await.unwrap();

        let config = ApiConfig::resolve(None, &prefs).await;
        assert_eq!(config.base_url, "http://from-prefs");
    }
}
