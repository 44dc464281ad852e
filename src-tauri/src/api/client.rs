use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use url::Url;

use super::types::{ClearBody, Envelope, ErrorBody};
use super::{AnalysisApi, AnalysisResponse, ApiError, ClearedHistory, HistorySession, TimeRange};
use crate::config::ServiceConfig;
use crate::validation::ValidatedPayload;

/// reqwest-backed client for the analysis service.
/// Every request is bounded by the configured timeout.
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpAnalysisClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            ApiError::Transport(format!("Invalid service URL '{}': {}", config.base_url, e))
        })?;

        // Keep the last path segment when joining endpoint names.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .user_agent("StudyHabits/1.0")
            .timeout(config.request_timeout())
            .build()
            .map_err(ApiError::from_reqwest)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(name)
            .map_err(|e| ApiError::Transport(format!("Invalid endpoint '{}': {}", name, e)))
    }
}

/// Turn a non-2xx response into the service's own message when it sent one.
fn status_error(status: StatusCode, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    match parsed.error.or(parsed.message) {
        Some(message) if !message.is_empty() => ApiError::Server(message),
        _ => ApiError::Transport(format!(
            "HTTP {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )),
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(ApiError::from_reqwest)?;

    if !status.is_success() {
        warn!("Analysis service returned {}: {}", status, body);
        return Err(status_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Unwrap a `{status, data}` body, treating any status other than "success" as a server error.
fn unwrap_envelope<T>(envelope: Envelope<T>, fallback: &str) -> Result<T, ApiError> {
    if envelope.status != "success" {
        let message = envelope
            .message
            .or(envelope.error)
            .unwrap_or_else(|| fallback.to_string());
        return Err(ApiError::Server(message));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
}

impl AnalysisApi for HttpAnalysisClient {
    async fn analyze(&self, payload: &ValidatedPayload) -> Result<AnalysisResponse, ApiError> {
        let url = self.endpoint("analyze")?;
        info!("Submitting study session for {}", payload.username);

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        read_json(response).await
    }

    async fn history(
        &self,
        username: &str,
        range: TimeRange,
    ) -> Result<Vec<HistorySession>, ApiError> {
        let url = self.endpoint("history")?;
        let response = self
            .client
            .get(url)
            .query(&[("username", username), ("range", range.as_str())])
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let envelope: Envelope<Vec<HistorySession>> = read_json(response).await?;
        let sessions = unwrap_envelope(envelope, "Failed to load history")?;
        info!(
            "Fetched {} sessions for {} ({})",
            sessions.len(),
            username,
            range
        );
        Ok(sessions)
    }

    async fn usernames(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint("usernames")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let envelope: Envelope<Vec<String>> = read_json(response).await?;
        unwrap_envelope(envelope, "Failed to load usernames")
    }

    async fn clear_history(
        &self,
        username: &str,
        range: TimeRange,
    ) -> Result<ClearedHistory, ApiError> {
        let url = self.endpoint("clear-history")?;
        info!("Clearing history for {} ({})", username, range);

        let response = self
            .client
            .delete(url)
            .query(&[("username", username), ("range", range.as_str())])
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let body: ClearBody = read_json(response).await?;
        if body.status != "success" {
            return Err(ApiError::Server(
                body.message
                    .or(body.error)
                    .unwrap_or_else(|| "Failed to clear history".to_string()),
            ));
        }

        Ok(ClearedHistory {
            deleted_count: body.deleted_count,
            message: body.message,
        })
    }
}
