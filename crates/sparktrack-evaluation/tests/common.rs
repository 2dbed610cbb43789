#![allow(dead_code)]

use std::sync::Mutex;

use serde_json::json;

use sparktrack_core::models::evaluation::{EvaluationRecord, SubmitResponse};
use sparktrack_core::models::group::{Group, Member, NewGroup};
use sparktrack_core::models::review::ReviewType;
use sparktrack_core::models::role::Role;
use sparktrack_evaluation::backend::EvaluationBackend;
use sparktrack_evaluation::envelope::EvaluationsEnvelope;
use sparktrack_evaluation::error::EvaluationError;
use sparktrack_evaluation::payload::EvaluationPayload;

/// In-memory backend recording every call.
pub struct FakeBackend {
    pub records: Vec<EvaluationRecord>,
    pub response: Result<SubmitResponse, String>,
    pub fetches: Mutex<Vec<(Role, ReviewType, String)>>,
    pub submissions: Mutex<Vec<(Role, EvaluationPayload)>>,
}

impl FakeBackend {
    pub fn new(records: Vec<EvaluationRecord>) -> Self {
        Self {
            records,
            response: Ok(SubmitResponse::ok("Evaluation saved")),
            fetches: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn responding(mut self, response: Result<SubmitResponse, String>) -> Self {
        self.response = response;
        self
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

impl EvaluationBackend for FakeBackend {
    async fn fetch_evaluations(
        &self,
        role: Role,
        review: ReviewType,
        group_id: &str,
    ) -> Result<EvaluationsEnvelope, EvaluationError> {
        self.fetches
            .lock()
            .unwrap()
            .push((role, review, group_id.to_string()));
        Ok(EvaluationsEnvelope::Flat {
            evaluations: self.records.clone(),
        })
    }

    async fn submit_evaluation(
        &self,
        role: Role,
        payload: &EvaluationPayload,
    ) -> Result<SubmitResponse, EvaluationError> {
        self.submissions
            .lock()
            .unwrap()
            .push((role, payload.clone()));
        self.response.clone().map_err(EvaluationError::Backend)
    }
}

pub fn group(id: &str) -> Group {
    NewGroup {
        group_id: id.to_string(),
        guide_name: "Prof. Kulkarni".to_string(),
        members: vec![
            Member {
                enrollment_no: "E1".to_string(),
                name: "Asha".to_string(),
            },
            Member {
                enrollment_no: "E2".to_string(),
                name: "Bilal".to_string(),
            },
        ],
    }
    .into_group()
    .unwrap()
}

pub fn record(group_id: &str, review: u8, enrollment_no: &str, marks: serde_json::Value) -> EvaluationRecord {
    serde_json::from_value(json!({
        "group_id": group_id,
        "review": review,
        "enrollment_no": enrollment_no,
        "marks": marks,
    }))
    .unwrap()
}
