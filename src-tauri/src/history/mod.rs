//! Study session history kept by the analysis service.
//!
//! Fetches a user's sessions for a time range, annotates them for display,
//! and deletes sessions by range.

pub mod query;
pub mod types;

pub use query::{HistoryQuery, RequestToken};
pub use types::{display_timestamp, ClearOutcome, FetchOutcome, HistoryRow};
