//! Tauri commands for session history.
//!
//! Provides commands for fetching a user's sessions by time range,
//! deleting sessions by range, and listing known usernames.

use tauri::State;
use tracing::info;

use crate::api::TimeRange;
use crate::history::{ClearOutcome, FetchOutcome};
use crate::state::AppState;

/// Fetch sessions for `username` within `range`, newest first.
///
/// `seq` numbers the view's requests in the order the user made them.
/// Returns `Superseded` when a higher `seq` was seen before this one resolved.
#[tauri::command]
pub async fn fetch_history(
    state: State<'_, AppState>,
    username: String,
    range: TimeRange,
    seq: u64,
) -> Result<FetchOutcome, String> {
    info!("History requested for {} ({}, #{})", username, range, seq);
    let token = state.history.issue_seq(seq);
    Ok(state
        .history
        .fetch(&state.client, &state.session, token, &username, range)
        .await)
}

/// Delete sessions within `delete_range`, then re-fetch `query_range` as request `seq`.
#[tauri::command]
pub async fn clear_history(
    state: State<'_, AppState>,
    username: String,
    delete_range: TimeRange,
    query_range: TimeRange,
    seq: u64,
) -> Result<ClearOutcome, String> {
    let token = state.history.issue_seq(seq);
    Ok(state
        .history
        .clear(
            &state.client,
            &state.session,
            token,
            &username,
            delete_range,
            query_range,
        )
        .await)
}

#[tauri::command]
pub async fn list_usernames(state: State<'_, AppState>) -> Result<Vec<String>, String> {
    let names = state.history.suggestions(&state.client).await;
    info!("Loaded {} username suggestions", names.len());
    Ok(names)
}
