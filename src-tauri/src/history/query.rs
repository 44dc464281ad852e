use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::types::{ClearOutcome, FetchOutcome, HistoryRow};
use crate::api::{with_timeout, AnalysisApi, TimeRange};
use crate::session::SessionContext;

/// Identifies one issued fetch. Only the most recently issued token may
/// update the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// History queries for one consumer (the history view).
pub struct HistoryQuery {
    latest: AtomicU64,
    timeout: Duration,
}

impl HistoryQuery {
    pub fn new(timeout: Duration) -> Self {
        Self {
            latest: AtomicU64::new(0),
            timeout,
        }
    }

    /// Issue a new token, superseding every earlier one.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Token for a sequence number assigned by the caller at selection time.
    ///
    /// Commands may reach the backend out of order. A request whose `seq` is
    /// below one already seen is stale on arrival and can never become current.
    pub fn issue_seq(&self, seq: u64) -> RequestToken {
        self.latest.fetch_max(seq, Ordering::SeqCst);
        RequestToken(seq)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Fetch `username`'s sessions for `range` on behalf of `token`.
    ///
    /// A response that resolves after a newer token was issued is dropped as
    /// `Superseded`, whatever it contains. When the response is applied, the
    /// searched username becomes the active one.
    pub async fn fetch<A: AnalysisApi>(
        &self,
        api: &A,
        session: &SessionContext,
        token: RequestToken,
        username: &str,
        range: TimeRange,
    ) -> FetchOutcome {
        let username = username.trim();
        if username.is_empty() {
            return FetchOutcome::Failed {
                message: "Please enter a username".to_string(),
            };
        }

        let result = with_timeout(self.timeout, api.history(username, range)).await;

        if !self.is_current(token) {
            debug!("Dropping superseded history response ({} {})", username, range);
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(sessions) => {
                let persist_warning = session.remember_username(username);
                if sessions.is_empty() {
                    FetchOutcome::Empty {
                        username: username.to_string(),
                        range,
                        persist_warning,
                    }
                } else {
                    FetchOutcome::Loaded {
                        username: username.to_string(),
                        range,
                        sessions: sessions.into_iter().map(HistoryRow::from).collect(),
                        persist_warning,
                    }
                }
            }
            Err(e) => {
                warn!("History fetch failed for {}: {}", username, e);
                FetchOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Delete `username`'s sessions within `delete_range`, then re-fetch
    /// `query_range` under `token`. The two ranges are independent: the list
    /// shown after a delete is always the query range.
    pub async fn clear<A: AnalysisApi>(
        &self,
        api: &A,
        session: &SessionContext,
        token: RequestToken,
        username: &str,
        delete_range: TimeRange,
        query_range: TimeRange,
    ) -> ClearOutcome {
        let username = username.trim();
        if username.is_empty() {
            return ClearOutcome::Failed {
                message: "Search for a username before clearing history".to_string(),
            };
        }

        let deletion = with_timeout(self.timeout, api.clear_history(username, delete_range));
        let cleared = match deletion.await {
            Ok(cleared) => cleared,
            Err(e) => {
                warn!("Clearing history failed for {}: {}", username, e);
                return ClearOutcome::Failed {
                    message: e.to_string(),
                };
            }
        };

        info!(
            "Deleted {} sessions for {} from {}",
            cleared.deleted_count,
            username,
            delete_range.label()
        );

        let refreshed = self
            .fetch(api, session, token, username, query_range)
            .await;
        ClearOutcome::Cleared {
            deleted_count: cleared.deleted_count,
            message: format!(
                "Successfully deleted {} records from {}",
                cleared.deleted_count,
                delete_range.label()
            ),
            refreshed,
        }
    }

    /// Recently seen usernames. Advisory only, so failures yield an empty list.
    pub async fn suggestions<A: AnalysisApi>(&self, api: &A) -> Vec<String> {
        match with_timeout(self.timeout, api.usernames()).await {
            Ok(names) => names,
            Err(e) => {
                warn!("Could not load username suggestions: {}", e);
                Vec::new()
            }
        }
    }
}
