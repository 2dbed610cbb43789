use serde::{Deserialize, Serialize};

use sparktrack_core::models::deadline::{self, DeadlineToggle};
use sparktrack_core::models::review::ReviewType;

use crate::error::EvaluationError;

/// Toggles that may never be enabled together.
const EXCLUSIVE: [&str; 2] = [deadline::PBL_REVIEW_1, deadline::PBL_REVIEW_2];

/// Body of `GET /api/external/active-pbl-review`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveReviewResponse {
    #[serde(rename = "activeReview")]
    pub active_review: Option<ReviewType>,
}

/// Which of review 1 / review 2 is open. Both open at once is an error, not
/// a first-match: the registry refuses to get there, so seeing it means the
/// data was written around the registry.
pub fn resolve_active_review(
    toggles: &[DeadlineToggle],
) -> Result<Option<ReviewType>, EvaluationError> {
    let first = deadline::is_enabled(toggles, deadline::PBL_REVIEW_1);
    let second = deadline::is_enabled(toggles, deadline::PBL_REVIEW_2);
    match (first, second) {
        (true, true) => Err(EvaluationError::ConflictingReviews),
        (true, false) => Ok(Some(ReviewType::Review1)),
        (false, true) => Ok(Some(ReviewType::Review2)),
        (false, false) => Ok(None),
    }
}

/// Review 3 has its own flag and is resolved independently of 1 and 2.
pub fn review3_open(toggles: &[DeadlineToggle]) -> bool {
    deadline::is_enabled(toggles, deadline::PBL_REVIEW_3)
}

/// Whether submissions for `review` are currently accepted.
pub fn is_review_open(toggles: &[DeadlineToggle], review: ReviewType) -> bool {
    deadline::is_enabled(toggles, review.deadline_key())
}

/// The process-wide toggle set, with the exclusivity rule enforced on write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineRegistry {
    toggles: Vec<DeadlineToggle>,
}

impl DeadlineRegistry {
    /// Registry with every review toggle present and disabled.
    pub fn with_defaults() -> Self {
        Self {
            toggles: ReviewType::ALL
                .iter()
                .map(|r| DeadlineToggle::new(r.deadline_key(), false))
                .collect(),
        }
    }

    pub fn from_toggles(toggles: Vec<DeadlineToggle>) -> Self {
        Self { toggles }
    }

    pub fn toggles(&self) -> &[DeadlineToggle] {
        &self.toggles
    }

    pub fn get(&self, key: &str) -> Option<&DeadlineToggle> {
        self.toggles.iter().find(|t| t.key == key)
    }

    /// Set a toggle, creating it if unknown. Enabling one of the exclusive
    /// review toggles while the other is on is refused; disabling always works.
    pub fn set(&mut self, key: &str, enabled: bool) -> Result<&DeadlineToggle, EvaluationError> {
        if enabled && EXCLUSIVE.contains(&key) {
            if let Some(other) = EXCLUSIVE
                .iter()
                .find(|k| **k != key && deadline::is_enabled(&self.toggles, k))
            {
                return Err(EvaluationError::ExclusiveToggle {
                    requested: key.to_string(),
                    conflicting: other.to_string(),
                });
            }
        }

        let idx = match self.toggles.iter().position(|t| t.key == key) {
            Some(idx) => {
                self.toggles[idx].enabled = enabled;
                idx
            }
            None => {
                self.toggles.push(DeadlineToggle::new(key, enabled));
                self.toggles.len() - 1
            }
        };
        tracing::info!(key, enabled, "deadline toggle set");
        Ok(&self.toggles[idx])
    }

    pub fn active_review(&self) -> Result<Option<ReviewType>, EvaluationError> {
        resolve_active_review(&self.toggles)
    }
}
