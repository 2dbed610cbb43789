//! Response shapes of the evaluation and deadline endpoints, normalized here
//! and nowhere else.

use serde::{Deserialize, Serialize};

use sparktrack_core::models::deadline::DeadlineToggle;
use sparktrack_core::models::evaluation::EvaluationRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationsData {
    #[serde(default)]
    pub evaluations: Vec<EvaluationRecord>,
}

/// The three shapes evaluation fetches come back in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvaluationsEnvelope {
    /// `{ "data": { "evaluations": [...] } }`
    Nested { data: EvaluationsData },
    /// `{ "evaluations": [...] }`
    Flat { evaluations: Vec<EvaluationRecord> },
    /// `[...]`
    Bare(Vec<EvaluationRecord>),
}

impl EvaluationsEnvelope {
    pub fn nested(evaluations: Vec<EvaluationRecord>) -> Self {
        EvaluationsEnvelope::Nested {
            data: EvaluationsData { evaluations },
        }
    }

    pub fn into_records(self) -> Vec<EvaluationRecord> {
        match self {
            EvaluationsEnvelope::Nested { data } => data.evaluations,
            EvaluationsEnvelope::Flat { evaluations } => evaluations,
            EvaluationsEnvelope::Bare(records) => records,
        }
    }
}

/// `GET /api/deadlines` answers either `{data: [...]}` or `{deadlines: [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeadlinesEnvelope {
    Data { data: Vec<DeadlineToggle> },
    Deadlines { deadlines: Vec<DeadlineToggle> },
    Bare(Vec<DeadlineToggle>),
}

impl DeadlinesEnvelope {
    pub fn into_toggles(self) -> Vec<DeadlineToggle> {
        match self {
            DeadlinesEnvelope::Data { data } => data,
            DeadlinesEnvelope::Deadlines { deadlines } => deadlines,
            DeadlinesEnvelope::Bare(toggles) => toggles,
        }
    }
}
