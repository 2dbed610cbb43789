use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const PBL_REVIEW_1: &str = "pbl_review_1";
pub const PBL_REVIEW_2: &str = "pbl_review_2";
pub const PBL_REVIEW_3: &str = "pbl_review_3";

/// An admin-controlled switch gating whether a review (or other feature) is
/// open to submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeadlineToggle {
    pub key: String,
    pub enabled: bool,
}

impl DeadlineToggle {
    pub fn new(key: impl Into<String>, enabled: bool) -> Self {
        Self {
            key: key.into(),
            enabled,
        }
    }
}

/// Look up a toggle by key. Unknown keys read as disabled.
pub fn is_enabled(toggles: &[DeadlineToggle], key: &str) -> bool {
    toggles.iter().any(|t| t.key == key && t.enabled)
}

/// Body of `PUT /api/deadlines/{key}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SetDeadlineRequest {
    pub enabled: bool,
}
