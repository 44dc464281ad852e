//! Submission of a study session for analysis.
//!
//! `Idle → Validating → Submitting → {Success, Failed} → Idle`. Invalid
//! drafts go straight back to `Idle` without a request. Only one submission
//! can be in flight; a second one while busy is refused.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::{with_timeout, AnalysisApi, AnalysisResponse};
use crate::risk::{format_percent, normalize_risk_score, RiskBucket, HIGH_RISK_THRESHOLD};
use crate::session::SessionContext;
use crate::validation::{validate_draft, FieldErrors, FormDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// Analysis result prepared for the results card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub username: String,
    /// Risk on a 0-100 scale.
    pub risk_percent: f64,
    /// `risk_percent` with one decimal.
    pub risk_display: String,
    pub bucket: RiskBucket,
    pub high_risk_alert: bool,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub advice: Option<String>,
    pub raw_risk_score: f64,
    pub model_error: Option<String>,
}

impl AnalysisView {
    pub fn from_response(username: String, response: AnalysisResponse) -> Self {
        let raw_risk_score = response.ml_prediction.risk_score.unwrap_or(0.0);
        let risk_percent = normalize_risk_score(raw_risk_score);

        // The combined list already includes the rule engine's advice.
        let recommendations = if response.recommendations.is_empty() {
            response.rule_based_analysis.recommendations
        } else {
            response.recommendations
        };

        Self {
            username,
            risk_percent,
            risk_display: format_percent(risk_percent),
            bucket: RiskBucket::from_score(risk_percent),
            high_risk_alert: risk_percent > HIGH_RISK_THRESHOLD,
            warnings: response.rule_based_analysis.warnings,
            recommendations,
            advice: response.chatgpt_advice.filter(|a| !a.trim().is_empty()),
            raw_risk_score,
            model_error: response.ml_prediction.error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Validation failed; nothing was sent.
    Invalid { errors: FieldErrors },
    Analyzed {
        result: AnalysisView,
        scroll_to_results: bool,
        /// Set when the analyzed username could not be saved.
        persist_warning: Option<String>,
    },
    Failed { message: String },
    /// Another submission is still in flight.
    Busy,
}

pub struct SubmissionFlow {
    state: Mutex<SubmissionState>,
    timeout: Duration,
}

/// Returns the flow to `Idle` when the submission ends, however it ends.
struct InFlight<'a>(&'a SubmissionFlow);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.transition(SubmissionState::Idle);
    }
}

impl SubmissionFlow {
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: Mutex::new(SubmissionState::Idle),
            timeout,
        }
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, next: SubmissionState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug!("Submission {:?} -> {:?}", *state, next);
        *state = next;
    }

    fn try_begin(&self) -> Option<InFlight<'_>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != SubmissionState::Idle {
            return None;
        }
        debug!("Submission Idle -> Validating");
        *state = SubmissionState::Validating;
        Some(InFlight(self))
    }

    /// Validate `draft` and, when valid, send it for analysis.
    ///
    /// The username is persisted only after the service confirmed the
    /// analysis. The draft is never touched, so a failure loses no input.
    pub async fn submit<A: AnalysisApi>(
        &self,
        api: &A,
        session: &SessionContext,
        draft: &FormDraft,
    ) -> SubmissionOutcome {
        let Some(_in_flight) = self.try_begin() else {
            warn!("Submission ignored, another one is in flight");
            return SubmissionOutcome::Busy;
        };

        let payload = match validate_draft(draft) {
            Ok(payload) => payload,
            Err(errors) => {
                debug!("Draft rejected: {}", errors);
                return SubmissionOutcome::Invalid { errors };
            }
        };

        self.transition(SubmissionState::Submitting);
        match with_timeout(self.timeout, api.analyze(&payload)).await {
            Ok(response) => {
                self.transition(SubmissionState::Success);
                let persist_warning = session.remember_username(&payload.username);
                let result = AnalysisView::from_response(payload.username, response);
                info!(
                    "Analysis complete for {}: {}% ({})",
                    result.username,
                    result.risk_display,
                    result.bucket.label()
                );
                SubmissionOutcome::Analyzed {
                    result,
                    scroll_to_results: true,
                    persist_warning,
                }
            }
            Err(e) => {
                self.transition(SubmissionState::Failed);
                warn!("Analysis failed for {}: {}", payload.username, e);
                SubmissionOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
