use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProblemStatement {
    pub id: Uuid,
    pub group_id: String,
    pub title: String,
    /// Project type, e.g. "Research" or "Product".
    pub kind: String,
    pub technology_bucket: Vec<String>,
    pub domain: Vec<String>,
    pub description: String,
    pub submitted: bool,
    pub updated_at: jiff::Timestamp,
}

/// Mentor input for creating or editing a group's problem statement.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProblemStatementDraft {
    pub title: String,
    pub kind: String,
    #[serde(default)]
    pub technology_bucket: Vec<String>,
    #[serde(default)]
    pub domain: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub submitted: bool,
}
