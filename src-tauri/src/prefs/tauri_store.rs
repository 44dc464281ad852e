use std::sync::Arc;

use tauri::Runtime;
use tauri_plugin_store::Store;
use tracing::warn;

use super::PreferenceStore;

/// Preferences persisted by tauri-plugin-store. Every `set` is saved to disk
/// before returning.
pub struct TauriPreferences<R: Runtime> {
    store: Arc<Store<R>>,
}

impl<R: Runtime> TauriPreferences<R> {
    pub fn new(store: Arc<Store<R>>) -> Self {
        Self { store }
    }
}

impl<R: Runtime> PreferenceStore for TauriPreferences<R> {
    fn get(&self, key: &str) -> Option<String> {
        self.store
            .get(key)
            .and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.store.set(key, serde_json::json!(value));
        self.store.save().map_err(|e| {
            warn!("Failed to save preferences: {}", e);
            e.to_string()
        })
    }
}
