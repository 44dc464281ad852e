use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Relative time window used both to query and to delete history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Hour,
    Day,
    #[default]
    Week,
    Month,
    All,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        TimeRange::Hour,
        TimeRange::Day,
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::All,
    ];

    /// Query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Hour => "hour",
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::All => "all",
        }
    }

    /// Prose label, e.g. "the last hour".
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Hour => "the last hour",
            TimeRange::Day => "the last day",
            TimeRange::Week => "the last week",
            TimeRange::Month => "the last month",
            TimeRange::All => "all time",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| format!("Unknown time range: {}", s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MlPrediction {
    pub risk_score: Option<f64>,
    pub model_version: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuleBasedAnalysis {
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Successful `/analyze` body. Missing sections default to empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisResponse {
    pub input_data: Option<serde_json::Value>,
    pub ml_prediction: MlPrediction,
    pub rule_based_analysis: RuleBasedAnalysis,
    pub recommendations: Vec<String>,
    pub chatgpt_advice: Option<String>,
}

/// A past session as stored by the service. Never modified locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySession {
    pub id: i64,
    pub timestamp: String,
    pub study_hours: f64,
    pub sleep_hours: f64,
    pub break_frequency: f64,
    pub concentration_level: f64,
    #[serde(default)]
    pub risk_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClearedHistory {
    pub deleted_count: u64,
    pub message: Option<String>,
}

/// `{ status, data, message }` wrapper used by the history endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClearBody {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub deleted_count: u64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_parses_query_values() {
        for range in TimeRange::ALL {
            assert_eq!(range.as_str().parse::<TimeRange>().unwrap(), range);
        }
        assert!("fortnight".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_time_range_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TimeRange::Month).unwrap(), "\"month\"");
        assert_eq!(TimeRange::default(), TimeRange::Week);
    }

    #[test]
    fn test_analysis_response_tolerates_missing_sections() {
        let response: AnalysisResponse =
            serde_json::from_str(r#"{"ml_prediction":{"risk_score":0.42}}"#).unwrap();
        assert_eq!(response.ml_prediction.risk_score, Some(0.42));
        assert!(response.rule_based_analysis.warnings.is_empty());
        assert!(response.chatgpt_advice.is_none());
    }

    #[test]
    fn test_history_session_accepts_null_score() {
        let session: HistorySession = serde_json::from_str(
            r#"{"id":3,"timestamp":"2026-10-14 09:30:00","study_hours":5.5,"sleep_hours":7,
                "break_frequency":45,"concentration_level":4,"risk_score":null,"risk_level":"low"}"#,
        )
        .unwrap();
        assert_eq!(session.id, 3);
        assert_eq!(session.risk_score, None);
    }
}
