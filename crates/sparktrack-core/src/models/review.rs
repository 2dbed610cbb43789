use std::fmt;

use serde::{Deserialize, Serialize};

use super::deadline;
use crate::error::CoreError;

/// The evaluation checkpoints of a project. Serialized as the review number
/// (`1`, `2`, `3`) to match the `activeReview` wire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ReviewType {
    Review1,
    Review2,
    Review3,
}

impl ReviewType {
    pub const ALL: [ReviewType; 3] = [ReviewType::Review1, ReviewType::Review2, ReviewType::Review3];

    pub fn number(&self) -> u8 {
        match self {
            ReviewType::Review1 => 1,
            ReviewType::Review2 => 2,
            ReviewType::Review3 => 3,
        }
    }

    pub fn from_number(n: u8) -> Result<ReviewType, CoreError> {
        match n {
            1 => Ok(ReviewType::Review1),
            2 => Ok(ReviewType::Review2),
            3 => Ok(ReviewType::Review3),
            other => Err(CoreError::InvalidReview(other)),
        }
    }

    /// The deadline toggle gating submissions for this review.
    pub fn deadline_key(&self) -> &'static str {
        match self {
            ReviewType::Review1 => deadline::PBL_REVIEW_1,
            ReviewType::Review2 => deadline::PBL_REVIEW_2,
            ReviewType::Review3 => deadline::PBL_REVIEW_3,
        }
    }

    /// Copyright / patent / research-paper statuses are collected from
    /// review 2 onwards.
    pub fn has_status_fields(&self) -> bool {
        !matches!(self, ReviewType::Review1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReviewType::Review1 => "PBL Review 1",
            ReviewType::Review2 => "PBL Review 2",
            ReviewType::Review3 => "PBL Review 3",
        }
    }
}

impl TryFrom<u8> for ReviewType {
    type Error = CoreError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        ReviewType::from_number(n)
    }
}

impl From<ReviewType> for u8 {
    fn from(r: ReviewType) -> u8 {
        r.number()
    }
}

impl fmt::Display for ReviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "review{}", self.number())
    }
}
