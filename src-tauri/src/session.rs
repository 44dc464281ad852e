//! Shared username context for the submission and history flows.
//!
//! The stored username is read once when the context is built. Afterwards
//! `commit_username` is the only writer, and it is only called once a
//! submission or a history search has succeeded.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::prefs::{PreferenceStore, DRAFT_KEY, USERNAME_KEY};
use crate::validation::FormDraft;

pub struct SessionContext {
    prefs: Arc<dyn PreferenceStore>,
    username: RwLock<Option<String>>,
}

impl SessionContext {
    pub fn load(prefs: Arc<dyn PreferenceStore>) -> Self {
        let username = prefs
            .get(USERNAME_KEY)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        debug!("Session context loaded, username: {:?}", username);
        Self {
            prefs,
            username: RwLock::new(username),
        }
    }

    /// The last confirmed username, if any.
    pub fn username(&self) -> Option<String> {
        self.username.read().ok().and_then(|name| name.clone())
    }

    /// Persist `username` and make it the current one.
    /// The store is written first so memory never runs ahead of disk.
    pub fn commit_username(&self, username: &str) -> Result<(), String> {
        self.prefs.set(USERNAME_KEY, username)?;
        let mut current = self
            .username
            .write()
            .map_err(|e| format!("Session context poisoned: {}", e))?;
        if current.as_deref() != Some(username) {
            info!("Active username is now {}", username);
        }
        *current = Some(username.to_string());
        Ok(())
    }

    /// Commit `username` after a successful flow. A failed write does not undo
    /// the flow's result; it comes back as a message for the user instead.
    pub fn remember_username(&self, username: &str) -> Option<String> {
        match self.commit_username(username) {
            Ok(()) => None,
            Err(e) => {
                warn!("Failed to persist username {}: {}", username, e);
                Some(format!("Could not save your name for next time: {}", e))
            }
        }
    }

    /// The saved draft, or an empty draft pre-filled with the stored username
    /// when nothing usable was saved.
    pub fn restore_draft(&self) -> FormDraft {
        let fallback = || FormDraft::for_user(self.username().unwrap_or_default());

        let Some(raw) = self.prefs.get(DRAFT_KEY) else {
            return fallback();
        };

        match serde_json::from_str::<FormDraft>(&raw) {
            Ok(draft) => draft,
            Err(e) => {
                warn!("Ignoring unreadable saved draft: {}", e);
                fallback()
            }
        }
    }

    pub fn save_draft(&self, draft: &FormDraft) -> Result<(), String> {
        let json = serde_json::to_string(draft)
            .map_err(|e| format!("Failed to serialize draft: {}", e))?;
        self.prefs.set(DRAFT_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferences;

    fn context(prefs: MemoryPreferences) -> (SessionContext, Arc<MemoryPreferences>) {
        let prefs = Arc::new(prefs);
        (SessionContext::load(prefs.clone()), prefs)
    }

    #[test]
    fn test_empty_store_is_a_valid_initial_state() {
        let (session, _) = context(MemoryPreferences::new());
        assert_eq!(session.username(), None);
        assert_eq!(session.restore_draft(), FormDraft::default());
    }

    #[test]
    fn test_commit_username_writes_store_and_memory() {
        let (session, prefs) = context(MemoryPreferences::new());
        session.commit_username("ana").unwrap();
        assert_eq!(session.username().as_deref(), Some("ana"));
        assert_eq!(prefs.get(USERNAME_KEY).as_deref(), Some("ana"));
    }

    #[test]
    fn test_draft_round_trips_through_store() {
        let (session, _) = context(MemoryPreferences::new());
        let draft = FormDraft {
            username: "ana".to_string(),
            study_hours: "4".to_string(),
            ..FormDraft::default()
        };
        session.save_draft(&draft).unwrap();
        assert_eq!(session.restore_draft(), draft);
    }

    #[test]
    fn test_corrupted_draft_falls_back_to_stored_username() {
        let prefs = MemoryPreferences::new()
            .with_value(USERNAME_KEY, "ben")
            .with_value(DRAFT_KEY, "{not json");
        let (session, _) = context(prefs);
        assert_eq!(session.restore_draft(), FormDraft::for_user("ben"));
    }

    #[test]
    fn test_missing_draft_prefills_username() {
        let prefs = MemoryPreferences::new().with_value(USERNAME_KEY, "ben");
        let (session, _) = context(prefs);
        assert_eq!(session.restore_draft().username, "ben");
    }

    #[test]
    fn test_blank_stored_username_is_treated_as_absent() {
        let prefs = MemoryPreferences::new().with_value(USERNAME_KEY, "   ");
        let (session, _) = context(prefs);
        assert_eq!(session.username(), None);
    }

    #[test]
    fn test_remember_username_reports_failed_write() {
        let session = crate::test_utils::read_only_session();
        let warning = session.remember_username("ana");
        assert_eq!(
            warning.as_deref(),
            Some("Could not save your name for next time: preferences.json is read-only")
        );
        assert_eq!(session.username(), None);

        let (session, prefs) = crate::test_utils::memory_session();
        assert_eq!(session.remember_username("ana"), None);
        assert_eq!(prefs.get(USERNAME_KEY).as_deref(), Some("ana"));
    }
}
