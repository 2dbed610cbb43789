use thiserror::Error;

use crate::status::BlockReason;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("both pbl_review_1 and pbl_review_2 are enabled")]
    ConflictingReviews,

    #[error("cannot enable {requested} while {conflicting} is enabled")]
    ExclusiveToggle {
        requested: String,
        conflicting: String,
    },

    #[error("No Active PBL Review Session")]
    NoActiveSession,

    #[error("{0}")]
    Blocked(BlockReason),

    #[error("marks for this group have already been submitted and are read-only")]
    ReadOnly,

    #[error("evaluation already submitted")]
    AlreadySubmitted,

    #[error("form is not editable while {0}")]
    NotEditable(&'static str),

    #[error("status fields do not apply to this review")]
    NoStatusFields,

    #[error("student {0} is marked absent")]
    StudentAbsent(String),

    #[error("unknown student: {0}")]
    UnknownStudent(String),

    #[error("unknown field '{0}' for this rubric")]
    UnknownField(String),

    #[error("{0}")]
    Backend(String),

    #[error("rubric error: {0}")]
    Rubric(#[from] sparktrack_rubrics::error::RubricError),

    #[error(transparent)]
    Core(#[from] sparktrack_core::error::CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
