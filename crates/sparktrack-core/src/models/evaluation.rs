use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use super::review::ReviewType;
use crate::error::CoreError;

/// Wire sentinel for an absent student, used both per field and as a total.
pub const ABSENT: &str = "AB";

/// Wire sentinel for a publication status that has not been set.
pub const NOT_SET: &str = "NA";

/// A single criterion mark, or the absent sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkValue {
    Score(u32),
    Absent,
}

/// A student's total. Same wire shape as a mark: a number or `"AB"`.
pub type Total = MarkValue;

impl MarkValue {
    pub fn score(&self) -> Option<u32> {
        match self {
            MarkValue::Score(n) => Some(*n),
            MarkValue::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, MarkValue::Absent)
    }
}

impl fmt::Display for MarkValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkValue::Score(n) => write!(f, "{n}"),
            MarkValue::Absent => f.write_str(ABSENT),
        }
    }
}

impl Serialize for MarkValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MarkValue::Score(n) => serializer.serialize_u32(*n),
            MarkValue::Absent => serializer.serialize_str(ABSENT),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMark {
    Number(f64),
    Text(String),
}

impl TryFrom<RawMark> for MarkValue {
    type Error = CoreError;

    fn try_from(raw: RawMark) -> Result<Self, Self::Error> {
        match raw {
            RawMark::Number(n)
                if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) =>
            {
                Ok(MarkValue::Score(n as u32))
            }
            RawMark::Number(n) => Err(CoreError::InvalidMark(n.to_string())),
            RawMark::Text(s) => {
                let trimmed = s.trim();
                if trimmed.eq_ignore_ascii_case(ABSENT) {
                    return Ok(MarkValue::Absent);
                }
                trimmed
                    .parse::<u32>()
                    .map(MarkValue::Score)
                    .map_err(|_| CoreError::InvalidMark(s.clone()))
            }
        }
    }
}

impl<'de> Deserialize<'de> for MarkValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawMark::deserialize(deserializer)?;
        MarkValue::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Progress of a group's copyright, patent or research paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PublicationStatus {
    #[default]
    #[serde(rename = "NA")]
    NotSet,
    #[serde(rename = "In progress")]
    InProgress,
    Prepared,
    Filed,
    Submitted,
    Published,
    Granted,
}

impl PublicationStatus {
    pub fn is_set(&self) -> bool {
        !matches!(self, PublicationStatus::NotSet)
    }

    pub fn parse(raw: &str) -> Result<PublicationStatus, CoreError> {
        let value = serde_json::Value::String(raw.trim().to_string());
        serde_json::from_value(value).map_err(|_| CoreError::InvalidStatus(raw.to_string()))
    }
}

/// Status fields collected from review 2 onwards. Which of them gate mark
/// entry depends on the group's year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupStatuses {
    #[serde(default)]
    pub copyright: PublicationStatus,
    #[serde(default)]
    pub patent: PublicationStatus,
    #[serde(default)]
    pub research_paper: PublicationStatus,
}

/// Contact details an external evaluator attaches to their submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExternalEvaluator {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// One student's evaluation row for one review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EvaluationRecord {
    pub group_id: String,
    #[ts(type = "1 | 2 | 3")]
    pub review: ReviewType,
    pub enrollment_no: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    #[ts(type = "Record<string, number | \"AB\" | null>")]
    pub marks: BTreeMap<String, Option<MarkValue>>,
    #[serde(default)]
    #[ts(type = "number | \"AB\" | null")]
    pub total: Option<Total>,
    #[serde(default)]
    pub absent: bool,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub external: Option<ExternalEvaluator>,
    #[serde(default)]
    pub statuses: Option<GroupStatuses>,
    #[serde(default)]
    pub evaluated_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<jiff::Timestamp>,
}

impl EvaluationRecord {
    /// Whether any criterion already carries a value (including `"AB"`).
    pub fn has_any_mark(&self) -> bool {
        self.marks.values().any(Option::is_some)
    }
}

/// Response of every evaluation submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}
