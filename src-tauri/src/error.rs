use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum StudyHabitsError {
    #[error("Preference error: {0}")]
    Preference(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<StudyHabitsError> for String {
    fn from(err: StudyHabitsError) -> Self {
        err.to_string()
    }
}
