use tauri::State;
use tracing::{debug, info};

use crate::error::StudyHabitsError;
use crate::state::AppState;
use crate::validation::FormDraft;

#[tauri::command]
pub fn load_draft(state: State<'_, AppState>) -> Result<FormDraft, String> {
    debug!("Restoring form draft");
    Ok(state.session.restore_draft())
}

#[tauri::command]
pub fn save_draft(state: State<'_, AppState>, draft: FormDraft) -> Result<(), String> {
    state
        .session
        .save_draft(&draft)
        .map_err(|e| StudyHabitsError::Preference(e).into())
}

#[tauri::command]
pub fn get_username(state: State<'_, AppState>) -> Result<Option<String>, String> {
    let username = state.session.username();
    info!("Active username: {:?}", username);
    Ok(username)
}
