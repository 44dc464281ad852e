//! Client-side validation of the study session form.
//!
//! Turns the raw strings typed into the form into a `ValidatedPayload`, or
//! into a set of field-scoped error messages. Validation is pure.

pub mod rules;
pub mod types;

pub use rules::validate_draft;
pub use types::{Field, FieldErrors, FormDraft, ValidatedPayload};
