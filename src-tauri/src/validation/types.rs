use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// In-progress form state, kept as the raw text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDraft {
    pub username: String,
    pub study_hours: String,
    pub sleep_hours: String,
    pub break_frequency: String,
    pub concentration_level: String,
}

impl FormDraft {
    /// Empty draft with only the username filled in.
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }
}

/// Payload accepted by the analysis service.
/// Only produced by `validate_draft`, so every value is within range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedPayload {
    pub username: String,
    pub study_hours: f64,
    pub sleep_hours: f64,
    pub break_frequency: f64,
    pub concentration_level: u8,
}

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Username,
    StudyHours,
    SleepHours,
    BreakFrequency,
    ConcentrationLevel,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Username,
        Field::StudyHours,
        Field::SleepHours,
        Field::BreakFrequency,
        Field::ConcentrationLevel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::StudyHours => "study_hours",
            Field::SleepHours => "sleep_hours",
            Field::BreakFrequency => "break_frequency",
            Field::ConcentrationLevel => "concentration_level",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name to human-readable message. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}
