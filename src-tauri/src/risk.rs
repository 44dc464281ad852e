//! Display helpers for burnout risk scores.

use serde::{Deserialize, Serialize};

/// Scores above this are high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;
/// Scores above this (and not high) are medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 40.0;

/// Bring a model score onto a 0-100 scale.
///
/// The service may report either a fraction or a percentage. Values at or
/// below 1 are read as fractions, so a genuine 0.5% risk displays as 50%.
/// Non-finite input displays as 0.
pub fn normalize_risk_score(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    let percent = if raw > 1.0 { raw } else { raw * 100.0 };
    percent.clamp(0.0, 100.0)
}

/// One decimal place, e.g. `85.0`.
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}", percent)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBucket {
    Low,
    Medium,
    High,
}

impl RiskBucket {
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_RISK_THRESHOLD {
            RiskBucket::High
        } else if score > MEDIUM_RISK_THRESHOLD {
            RiskBucket::Medium
        } else {
            RiskBucket::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBucket::Low => "Low",
            RiskBucket::Medium => "Medium",
            RiskBucket::High => "High",
        }
    }
}
