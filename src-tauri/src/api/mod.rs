//! Client side of the remote analysis service.
//!
//! The prediction itself is opaque: the service scores a session and keeps
//! the history. This module only knows the four endpoints and their shapes.

pub mod client;
pub mod types;

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

pub use client::HttpAnalysisClient;
pub use types::{
    AnalysisResponse, ClearedHistory, HistorySession, MlPrediction, RuleBasedAnalysis, TimeRange,
};

use crate::validation::ValidatedPayload;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("The analysis service did not respond in time")]
    Timeout,

    #[error("Could not reach the analysis service: {0}")]
    Transport(String),

    /// Message reported by the service itself.
    #[error("{0}")]
    Server(String),

    #[error("Unexpected response from the analysis service: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Bound any service call by `limit`; expiry is reported as `ApiError::Timeout`.
pub async fn with_timeout<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(ApiError::Timeout))
}

/// Operations offered by the analysis service.
///
/// Requests are not cancellable; callers that no longer want a response
/// simply ignore it when it arrives.
pub trait AnalysisApi: Send + Sync {
    /// `POST /analyze`
    fn analyze(
        &self,
        payload: &ValidatedPayload,
    ) -> impl Future<Output = Result<AnalysisResponse, ApiError>> + Send;

    /// `GET /history?username=&range=`, newest first.
    fn history(
        &self,
        username: &str,
        range: TimeRange,
    ) -> impl Future<Output = Result<Vec<HistorySession>, ApiError>> + Send;

    /// `GET /usernames`
    fn usernames(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;

    /// `DELETE /clear-history?username=&range=`
    fn clear_history(
        &self,
        username: &str,
        range: TimeRange,
    ) -> impl Future<Output = Result<ClearedHistory, ApiError>> + Send;
}
