use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

use crate::api::{HistorySession, TimeRange};
use crate::risk::RiskBucket;

/// A past session annotated for the history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub id: i64,
    pub timestamp: String,
    pub study_hours: f64,
    pub sleep_hours: f64,
    pub break_frequency: f64,
    /// Number of filled stars, 0-5.
    pub concentration_stars: u8,
    pub risk_score: Option<f64>,
    /// Rounded score, only when a non-zero score is present.
    pub risk_percent: Option<i64>,
    pub bucket: RiskBucket,
}

impl From<HistorySession> for HistoryRow {
    fn from(session: HistorySession) -> Self {
        let score = session.risk_score.filter(|s| s.is_finite());
        Self {
            id: session.id,
            timestamp: display_timestamp(&session.timestamp),
            study_hours: session.study_hours,
            sleep_hours: session.sleep_hours,
            break_frequency: session.break_frequency,
            concentration_stars: session.concentration_level.round().clamp(0.0, 5.0) as u8,
            risk_score: score,
            risk_percent: score.filter(|s| *s != 0.0).map(|s| s.round() as i64),
            bucket: RiskBucket::from_score(score.unwrap_or(0.0)),
        }
    }
}

/// Render a service timestamp as e.g. "Oct 14, 2026 9:15 PM".
/// Unrecognized formats are shown verbatim.
pub fn display_timestamp(raw: &str) -> String {
    const FORMAT: &str = "%b %-d, %Y %-I:%M %p";

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format(FORMAT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.naive_local().format(FORMAT).to_string();
    }
    raw.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchOutcome {
    Loaded {
        username: String,
        range: TimeRange,
        sessions: Vec<HistoryRow>,
        /// Set when the searched username could not be saved.
        persist_warning: Option<String>,
    },
    /// The user has no sessions in this range. Not an error.
    Empty {
        username: String,
        range: TimeRange,
        persist_warning: Option<String>,
    },
    Failed { message: String },
    /// A newer fetch was issued while this one was pending; ignore it.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClearOutcome {
    Cleared {
        deleted_count: u64,
        message: String,
        /// Re-fetch of the query range after the delete.
        refreshed: FetchOutcome,
    },
    Failed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_session;

    #[test]
    fn test_row_buckets_by_raw_score() {
        assert_eq!(HistoryRow::from(sample_session(1, Some(85.0))).bucket, RiskBucket::High);
        assert_eq!(HistoryRow::from(sample_session(2, Some(55.0))).bucket, RiskBucket::Medium);
        assert_eq!(HistoryRow::from(sample_session(3, Some(12.0))).bucket, RiskBucket::Low);
        assert_eq!(HistoryRow::from(sample_session(4, None)).bucket, RiskBucket::Low);
    }

    #[test]
    fn test_percent_shown_only_for_non_zero_scores() {
        assert_eq!(HistoryRow::from(sample_session(1, Some(71.6))).risk_percent, Some(72));
        assert_eq!(HistoryRow::from(sample_session(2, Some(0.0))).risk_percent, None);
        assert_eq!(HistoryRow::from(sample_session(3, None)).risk_percent, None);
    }

    #[test]
    fn test_concentration_stars_are_clamped() {
        let mut session = sample_session(1, None);
        session.concentration_level = 9.0;
        assert_eq!(HistoryRow::from(session).concentration_stars, 5);
    }

    #[test]
    fn test_display_timestamp_formats() {
        assert_eq!(display_timestamp("2026-10-14 21:15:00"), "Oct 14, 2026 9:15 PM");
        assert_eq!(display_timestamp("2026-10-14T08:05:00+00:00"), "Oct 14, 2026 8:05 AM");
        assert_eq!(display_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_outcome_serializes_with_kind_tag() {
        let json = serde_json::to_value(FetchOutcome::Empty {
            username: "ana".to_string(),
            range: TimeRange::Week,
            persist_warning: None,
        })
        .unwrap();
        assert_eq!(json["kind"], "empty");
        assert_eq!(json["range"], "week");
        assert_eq!(
            serde_json::to_value(FetchOutcome::Superseded).unwrap()["kind"],
            "superseded"
        );
    }
}
