//! Test doubles and sample data for the flow tests.
//!
//! `FakeApi` answers from scripted data and records every call. A `Gate`
//! holds a call open until the test releases it, which is how in-flight and
//! out-of-order scenarios are reproduced.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::api::{
    AnalysisApi, AnalysisResponse, ApiError, ClearedHistory, HistorySession, MlPrediction,
    RuleBasedAnalysis, TimeRange,
};
use crate::prefs::{MemoryPreferences, PreferenceStore};
use crate::session::SessionContext;
use crate::validation::{FormDraft, ValidatedPayload};

#[derive(Default)]
pub struct Gate {
    started: Notify,
    release: Notify,
}

impl Gate {
    /// Resolves once a call has reached this gate.
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[derive(Default)]
pub struct FakeApi {
    analysis: Mutex<Option<Result<AnalysisResponse, ApiError>>>,
    history: Mutex<HashMap<TimeRange, Result<Vec<HistorySession>, ApiError>>>,
    usernames: Mutex<Option<Result<Vec<String>, ApiError>>>,
    cleared: Mutex<Option<Result<ClearedHistory, ApiError>>>,
    gates: Mutex<HashMap<String, Arc<Gate>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(self, result: Result<AnalysisResponse, ApiError>) -> Self {
        *self.analysis.lock().unwrap() = Some(result);
        self
    }

    pub fn with_history(
        self,
        range: TimeRange,
        result: Result<Vec<HistorySession>, ApiError>,
    ) -> Self {
        self.history.lock().unwrap().insert(range, result);
        self
    }

    pub fn with_usernames(self, result: Result<Vec<String>, ApiError>) -> Self {
        *self.usernames.lock().unwrap() = Some(result);
        self
    }

    pub fn with_cleared(self, result: Result<ClearedHistory, ApiError>) -> Self {
        *self.cleared.lock().unwrap() = Some(result);
        self
    }

    /// Hold calls for `key` ("analyze", "history:week", ...) until released.
    pub fn gate(&self, key: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates
            .lock()
            .unwrap()
            .insert(key.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, key: &str, call: String) {
        self.calls.lock().unwrap().push(call);
        let gate = self.gates.lock().unwrap().get(key).cloned();
        if let Some(gate) = gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }
    }
}

impl AnalysisApi for FakeApi {
    async fn analyze(&self, payload: &ValidatedPayload) -> Result<AnalysisResponse, ApiError> {
        self.enter("analyze", format!("analyze:{}", payload.username))
            .await;
        self.analysis
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(sample_response(0.85)))
    }

    async fn history(
        &self,
        username: &str,
        range: TimeRange,
    ) -> Result<Vec<HistorySession>, ApiError> {
        let key = format!("history:{}", range);
        self.enter(&key, format!("history:{}:{}", username, range))
            .await;
        self.history
            .lock()
            .unwrap()
            .get(&range)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn usernames(&self) -> Result<Vec<String>, ApiError> {
        self.enter("usernames", "usernames".to_string()).await;
        self.usernames
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn clear_history(
        &self,
        username: &str,
        range: TimeRange,
    ) -> Result<ClearedHistory, ApiError> {
        self.enter("clear", format!("clear:{}:{}", username, range))
            .await;
        self.cleared.lock().unwrap().clone().unwrap_or_else(|| {
            Ok(ClearedHistory {
                deleted_count: 0,
                message: None,
            })
        })
    }
}

pub fn sample_response(risk_score: f64) -> AnalysisResponse {
    AnalysisResponse {
        input_data: None,
        ml_prediction: MlPrediction {
            risk_score: Some(risk_score),
            model_version: Some("2.1".to_string()),
            error: None,
        },
        rule_based_analysis: RuleBasedAnalysis {
            warnings: vec!["Less than 6 hours of sleep".to_string()],
            recommendations: vec!["Take a 10 minute break every hour".to_string()],
        },
        recommendations: vec!["Take a 10 minute break every hour".to_string()],
        chatgpt_advice: Some("Protect your sleep before exam week.".to_string()),
    }
}

pub fn sample_session(id: i64, risk_score: Option<f64>) -> HistorySession {
    HistorySession {
        id,
        timestamp: "2026-10-14 21:15:00".to_string(),
        study_hours: 6.0,
        sleep_hours: 5.5,
        break_frequency: 50.0,
        concentration_level: 3.0,
        risk_score,
    }
}

pub fn valid_draft(username: &str) -> FormDraft {
    FormDraft {
        username: username.to_string(),
        study_hours: "6".to_string(),
        sleep_hours: "7".to_string(),
        break_frequency: "45".to_string(),
        concentration_level: "4".to_string(),
    }
}

pub fn memory_session() -> (Arc<SessionContext>, Arc<MemoryPreferences>) {
    let prefs = Arc::new(MemoryPreferences::new());
    (Arc::new(SessionContext::load(prefs.clone())), prefs)
}

/// Preferences that can be read but refuse every write.
pub struct ReadOnlyPreferences;

impl PreferenceStore for ReadOnlyPreferences {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), String> {
        Err("preferences.json is read-only".to_string())
    }
}

pub fn read_only_session() -> Arc<SessionContext> {
    Arc::new(SessionContext::load(Arc::new(ReadOnlyPreferences)))
}
