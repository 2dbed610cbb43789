use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sparktrack_core::models::evaluation::{
    ExternalEvaluator, GroupStatuses, MarkValue, Total,
};
use sparktrack_core::models::review::ReviewType;

/// One student's normalized marks as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentMarks {
    pub enrollment_no: String,
    #[serde(default)]
    pub student_name: String,
    /// Every rubric field is present; absent students carry `"AB"` in each.
    pub marks: BTreeMap<String, Option<MarkValue>>,
    pub total: Total,
    #[serde(default)]
    pub absent: bool,
    #[serde(default)]
    pub feedback: String,
}

/// Body of every evaluation submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationPayload {
    pub group_id: String,
    pub review: ReviewType,
    /// Present from review 2 onwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<GroupStatuses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalEvaluator>,
    pub students: Vec<StudentMarks>,
}

impl EvaluationPayload {
    pub fn has_any_mark(&self) -> bool {
        self.students
            .iter()
            .any(|s| s.marks.values().any(Option::is_some))
    }
}
