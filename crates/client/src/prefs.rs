//! Persisted client preferences.
//!
//! A flat string key/value store backed by one JSON file, written
//! atomically via a `.tmp` rename. No schema versioning; unknown keys are
//! preserved as-is.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::Mutex;

/// Mobile layout card order.
pub const LAYOUT_ORDER_KEY: &str = "layout_order";
/// Mobile view mode (chart vs map).
pub const VIEW_MODE_KEY: &str = "view_mode";
/// Backend base-URL override.
pub const API_BASE_URL_KEY: &str = "api_base_url";

pub struct PrefsStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl PrefsStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn load_unlocked(&self) -> Result<BTreeMap<String, String>, String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).map_err(|e| e.to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.to_string()),
        }
    }

    async fn save_unlocked(&self, prefs: &BTreeMap<String, String>) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let text = serde_json::to_string_pretty(prefs).map_err(|e| e.to_string())?;
        tokio::fs::write(&tmp, text)
            .await
            .map_err(|e| e.to_string())?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let _g = self.lock.lock().await;
        let prefs = self.load_unlocked().await?;
        Ok(prefs.get(key).cloned())
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let _g = self.lock.lock().await;
        let mut prefs = self.load_unlocked().await?;
        prefs.insert(key.to_string(), value.to_string());
        self.save_unlocked(&prefs).await
    }

    pub async fn remove(&self, key: &str) -> Result<bool, String> {
        let _g = self.lock.lock().await;
        let mut prefs = self.load_unlocked().await?;
        let removed = prefs.remove(key).is_some();
        if removed {
            self.save_unlocked(&prefs).await?;
        }
        Ok(removed)
    }

    pub async fn list(&self) -> Result<BTreeMap<String, String>, String> {
        let _g = self.lock.lock().await;
        self.load_unlocked().await
    }
}

#[cfg(test)]
mod tests {
    use super::{PrefsStore, VIEW_MODE_KEY};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.get(VIEW_MODE_KEY).await.unwrap(), None);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path().join("prefs.json"));

        store.set(VIEW_MODE_KEY, "map").await.unwrap();
        assert_eq!(
            store.get(VIEW_MODE_KEY).await.unwrap(),
            Some("map".to_string())
        );

        store.set(VIEW_MODE_KEY, "chart").await.unwrap();
        assert_eq!(
            store.get(VIEW_MODE_KEY).await.unwrap(),
            Some("chart".to_string())
        );
    }

    #[tokio::test]
    async fn remove_reports_presence() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path().join("prefs.json"));

        assert!(!store.remove("absent").await.unwrap());
        store.set("k", "v").await.unwrap();
        assert!(store.remove("k").await.unwrap());
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
