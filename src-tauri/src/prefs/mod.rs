//! Local persistence of the username and the in-progress form draft.
//!
//! `PreferenceStore` is the seam: the desktop app uses `TauriPreferences`
//! (a JSON file managed by tauri-plugin-store), tests use `MemoryPreferences`.

mod memory;
mod tauri_store;

pub use memory::MemoryPreferences;
pub use tauri_store::TauriPreferences;

/// File name of the preference store inside the app data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Key holding the last confirmed username.
pub const USERNAME_KEY: &str = "username";

/// Key holding the serialized `FormDraft`.
pub const DRAFT_KEY: &str = "form_draft";

/// Synchronous string key-value storage.
///
/// A missing key is a normal state and reads as `None`.
/// Writes are last-write-wins in call order.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}
