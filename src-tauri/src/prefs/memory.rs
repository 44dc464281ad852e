use std::collections::HashMap;
use std::sync::Mutex;

use super::PreferenceStore;

/// In-memory store, used by tests and as a fallback when the on-disk store
/// cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| format!("Preference store poisoned: {}", e))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
