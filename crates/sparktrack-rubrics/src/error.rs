use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum RubricError {
    #[error("unknown rubric: {0}")]
    UnknownRubric(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("unknown field '{field}' for rubric '{rubric_id}'")]
    UnknownField { rubric_id: String, field: String },

    #[error("not a mark: {0:?}")]
    NotANumber(String),

    #[error("marks are whole numbers: {0:?}")]
    NotAWholeNumber(String),
}
