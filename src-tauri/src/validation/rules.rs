use super::types::{Field, FieldErrors, FormDraft, ValidatedPayload};

pub const USERNAME_MAX_CHARS: usize = 50;

/// Inclusive bounds and messages for one numeric field.
struct NumericRule {
    field: Field,
    min: f64,
    max: f64,
    missing: &'static str,
    out_of_range: &'static str,
}

const STUDY_HOURS: NumericRule = NumericRule {
    field: Field::StudyHours,
    min: 0.1,
    max: 24.0,
    missing: "Please enter valid study hours",
    out_of_range: "Must be between 0.1-24 hours",
};

const SLEEP_HOURS: NumericRule = NumericRule {
    field: Field::SleepHours,
    min: 0.0,
    max: 24.0,
    missing: "Please enter valid sleep hours",
    out_of_range: "Must be between 0-24 hours",
};

const BREAK_FREQUENCY: NumericRule = NumericRule {
    field: Field::BreakFrequency,
    min: 5.0,
    max: 120.0,
    missing: "Please enter valid break frequency",
    out_of_range: "Must be between 5-120 minutes",
};

const CONCENTRATION_LEVEL: NumericRule = NumericRule {
    field: Field::ConcentrationLevel,
    min: 1.0,
    max: 5.0,
    missing: "Please select concentration level",
    out_of_range: "Must be between 1-5",
};

impl NumericRule {
    /// Parse and range-check a raw value, recording at most one error.
    /// Empty, non-numeric and non-finite input are all "missing"; nothing is coerced to 0.
    fn check(&self, raw: &str, errors: &mut FieldErrors) -> Option<f64> {
        let value = match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                errors.insert(self.field, self.missing);
                return None;
            }
        };

        if value < self.min || value > self.max {
            errors.insert(self.field, self.out_of_range);
            return None;
        }

        Some(value)
    }
}

fn check_username(raw: &str, errors: &mut FieldErrors) -> Option<String> {
    let username = raw.trim();
    if username.is_empty() {
        errors.insert(Field::Username, "Please enter your name");
        return None;
    }
    if username.chars().count() > USERNAME_MAX_CHARS {
        errors.insert(Field::Username, "Name must be less than 50 characters");
        return None;
    }
    Some(username.to_string())
}

fn check_concentration(raw: &str, errors: &mut FieldErrors) -> Option<u8> {
    let value = CONCENTRATION_LEVEL.check(raw, errors)?;
    if value.fract() != 0.0 {
        errors.insert(Field::ConcentrationLevel, "Must be a whole number between 1-5");
        return None;
    }
    Some(value as u8)
}

/// Validate a form draft.
///
/// Returns the payload when every field is within its documented range,
/// otherwise a non-empty map holding one message per offending field.
/// All fields are checked, so several errors can be reported at once.
pub fn validate_draft(draft: &FormDraft) -> Result<ValidatedPayload, FieldErrors> {
    let mut errors = FieldErrors::default();

    let username = check_username(&draft.username, &mut errors);
    let study_hours = STUDY_HOURS.check(&draft.study_hours, &mut errors);
    let sleep_hours = SLEEP_HOURS.check(&draft.sleep_hours, &mut errors);
    let break_frequency = BREAK_FREQUENCY.check(&draft.break_frequency, &mut errors);
    let concentration_level = check_concentration(&draft.concentration_level, &mut errors);

    match (
        username,
        study_hours,
        sleep_hours,
        break_frequency,
        concentration_level,
    ) {
        (
            Some(username),
            Some(study_hours),
            Some(sleep_hours),
            Some(break_frequency),
            Some(concentration_level),
        ) if errors.is_empty() => Ok(ValidatedPayload {
            username,
            study_hours,
            sleep_hours,
            break_frequency,
            concentration_level,
        }),
        _ => Err(errors),
    }
}
