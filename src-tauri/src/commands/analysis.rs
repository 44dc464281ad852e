//! Tauri command for submitting a study session.

use tauri::State;
use tracing::info;

use crate::state::AppState;
use crate::submission::SubmissionOutcome;
use crate::validation::FormDraft;

/// Validate the draft and send it for analysis.
///
/// Validation errors, service errors and a refused concurrent submit are all
/// reported inside `SubmissionOutcome`, so the command itself does not fail.
#[tauri::command]
pub async fn submit_analysis(
    state: State<'_, AppState>,
    draft: FormDraft,
) -> Result<SubmissionOutcome, String> {
    info!("Analysis requested");
    Ok(state
        .submission
        .submit(&state.client, &state.session, &draft)
        .await)
}
