pub mod api;
mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod prefs;
pub mod risk;
pub mod session;
pub mod state;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use tauri::Manager;
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

pub use api::{AnalysisApi, ApiError, HttpAnalysisClient, TimeRange};
pub use history::{ClearOutcome, FetchOutcome, HistoryQuery, HistoryRow};
pub use session::SessionContext;
pub use submission::{AnalysisView, SubmissionFlow, SubmissionOutcome, SubmissionState};
pub use validation::{validate_draft, FieldErrors, FormDraft, ValidatedPayload};

use prefs::{MemoryPreferences, PreferenceStore, TauriPreferences, PREFERENCES_FILE};
use state::AppState;

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::config::load_draft,
            commands::config::save_draft,
            commands::config::get_username,
            commands::analysis::submit_analysis,
            commands::history::fetch_history,
            commands::history::clear_history,
            commands::history::list_usernames,
        ])
        .setup(|app| {
            let config = config::resolve_config();
            info!("Using analysis service at {}", config.base_url);

            let prefs: Arc<dyn PreferenceStore> = match app.store(PREFERENCES_FILE) {
                Ok(store) => Arc::new(TauriPreferences::new(store)),
                Err(e) => {
                    warn!("Preferences unavailable, keeping them in memory: {}", e);
                    Arc::new(MemoryPreferences::new())
                }
            };

            app.manage(AppState::new(&config, prefs)?);
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
