//! Per-group evaluation form.
//!
//! ```text
//! Loading -> NoActiveSession
//!         -> LockedReadOnly      (non-mentor, marks already exist)
//!         -> Blocked             (review 2/3, required status still "NA")
//!         -> Unlocked
//! Unlocked -> Submitting -> Submitted
//!                        -> (failure) back to Unlocked with a message
//! ```

use std::collections::BTreeMap;

use sparktrack_core::models::evaluation::{
    EvaluationRecord, ExternalEvaluator, GroupStatuses, MarkValue, PublicationStatus,
};
use sparktrack_core::models::group::Group;
use sparktrack_core::models::review::ReviewType;
use sparktrack_core::models::role::Role;
use sparktrack_rubrics::scoring::parse_mark;
use sparktrack_rubrics::{Rubric, rubric_for};

use crate::backend::EvaluationBackend;
use crate::error::EvaluationError;
use crate::payload::{EvaluationPayload, StudentMarks};
use crate::status::{BlockReason, StatusField, block_reason};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Loading,
    /// No review is open; nothing can be entered or submitted.
    NoActiveSession,
    Unlocked,
    LockedReadOnly,
    Blocked(BlockReason),
    Submitting,
    /// Terminal for this form.
    Submitted,
}

impl FormState {
    fn name(&self) -> &'static str {
        match self {
            FormState::Loading => "loading",
            FormState::NoActiveSession => "no review is active",
            FormState::Unlocked => "unlocked",
            FormState::LockedReadOnly => "read-only",
            FormState::Blocked(_) => "blocked",
            FormState::Submitting => "submitting",
            FormState::Submitted => "submitted",
        }
    }
}

/// What a submit attempt came to. Precondition failures are returned as
/// errors instead, without touching the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { message: Option<String> },
    /// The server said no, or the request failed. The form is back in its
    /// pre-submit state and the message is what to show.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub enrollment_no: String,
    pub name: String,
    pub marks: BTreeMap<String, Option<u32>>,
    pub absent: bool,
    pub total: MarkValue,
    pub feedback: String,
}

impl StudentRow {
    fn empty(enrollment_no: &str, name: &str, fields: &[String]) -> Self {
        Self {
            enrollment_no: enrollment_no.to_string(),
            name: name.to_string(),
            marks: fields.iter().map(|f| (f.clone(), None)).collect(),
            absent: false,
            total: MarkValue::Score(0),
            feedback: String::new(),
        }
    }

    fn recompute_total(&mut self) {
        self.total = if self.absent {
            MarkValue::Absent
        } else {
            MarkValue::Score(
                self.marks
                    .values()
                    .flatten()
                    .fold(0u32, |total, m| total.saturating_add(*m)),
            )
        };
    }

    /// Stored marks are clamped to the criterion maximum just like typed ones.
    fn fill_from(&mut self, record: &EvaluationRecord, rubric: Option<&dyn Rubric>) {
        if !record.student_name.is_empty() {
            self.name = record.student_name.clone();
        }
        self.feedback = record.feedback.clone();
        self.absent = record.absent
            || record.total.is_some_and(|t| t.is_absent())
            || record.marks.values().any(|m| m.is_some_and(|v| v.is_absent()));
        for (field, slot) in self.marks.iter_mut() {
            *slot = record
                .marks
                .get(field)
                .copied()
                .flatten()
                .and_then(|m| m.score())
                .map(|v| match rubric.and_then(|r| r.criterion(field)) {
                    Some(criterion) => criterion.clamp(i64::from(v)),
                    None => v,
                });
        }
        if self.absent {
            self.marks.values_mut().for_each(|m| *m = None);
        }
        self.recompute_total();
    }
}

type SubmittedCallback = Box<dyn FnMut(&EvaluationPayload) + Send>;

pub struct EvaluationForm {
    role: Role,
    review: Option<ReviewType>,
    group: Group,
    rubric: Option<Box<dyn Rubric>>,
    rows: Vec<StudentRow>,
    statuses: GroupStatuses,
    external: ExternalEvaluator,
    state: FormState,
    message: Option<String>,
    on_submitted: Option<SubmittedCallback>,
}

impl EvaluationForm {
    /// Fetch existing marks for `group` and settle into the first stable
    /// state. `review` is the resolved active review; `None` yields a form
    /// that only says no session is active.
    pub async fn load<B: EvaluationBackend>(
        backend: &B,
        role: Role,
        review: Option<ReviewType>,
        group: Group,
    ) -> Result<Self, EvaluationError> {
        let mut form = EvaluationForm {
            role,
            review,
            rubric: review.map(|r| rubric_for(r, group.year)),
            group,
            rows: Vec::new(),
            statuses: GroupStatuses::default(),
            external: ExternalEvaluator::default(),
            state: FormState::Loading,
            message: None,
            on_submitted: None,
        };

        let Some(review) = review else {
            form.state = FormState::NoActiveSession;
            form.message = Some(EvaluationError::NoActiveSession.to_string());
            return Ok(form);
        };

        let records = backend
            .fetch_evaluations(role, review, &form.group.group_id)
            .await?
            .into_records();
        form.apply_records(&records);

        form.state = if !role.can_edit_after_submission() && records.iter().any(|r| r.has_any_mark())
        {
            FormState::LockedReadOnly
        } else {
            form.settled_state()
        };

        tracing::debug!(
            group_id = %form.group.group_id,
            review = %review,
            role = %role,
            state = form.state.name(),
            "evaluation form loaded"
        );
        Ok(form)
    }

    fn apply_records(&mut self, records: &[EvaluationRecord]) {
        let fields = self.fields();
        let mut rows: Vec<StudentRow> = self
            .group
            .members
            .iter()
            .map(|m| StudentRow::empty(&m.enrollment_no, &m.name, &fields))
            .collect();

        for record in records {
            let idx = match rows
                .iter()
                .position(|r| r.enrollment_no == record.enrollment_no)
            {
                Some(idx) => idx,
                None => {
                    rows.push(StudentRow::empty(
                        &record.enrollment_no,
                        &record.student_name,
                        &fields,
                    ));
                    rows.len() - 1
                }
            };
            rows[idx].fill_from(record, self.rubric.as_deref());
        }

        if let Some(statuses) = records.iter().find_map(|r| r.statuses) {
            self.statuses = statuses;
        }
        if let Some(external) = records.iter().find_map(|r| r.external.clone()) {
            self.external = external;
        }
        self.rows = rows;
    }

    /// Unlocked or Blocked, depending on the status preconditions.
    fn settled_state(&self) -> FormState {
        match self.current_block() {
            Some(reason) => FormState::Blocked(reason),
            None => FormState::Unlocked,
        }
    }

    fn current_block(&self) -> Option<BlockReason> {
        self.review
            .and_then(|review| block_reason(review, self.group.year, &self.statuses))
    }

    fn fields(&self) -> Vec<String> {
        self.rubric
            .as_ref()
            .map(|r| r.fields().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn review(&self) -> Option<ReviewType> {
        self.review
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn rubric(&self) -> Option<&dyn Rubric> {
        self.rubric.as_deref()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn rows(&self) -> &[StudentRow] {
        &self.rows
    }

    pub fn row(&self, enrollment_no: &str) -> Option<&StudentRow> {
        self.rows.iter().find(|r| r.enrollment_no == enrollment_no)
    }

    pub fn statuses(&self) -> &GroupStatuses {
        &self.statuses
    }

    pub fn external(&self) -> &ExternalEvaluator {
        &self.external
    }

    /// The banner to show, if any: the no-session notice, the block reason,
    /// or the outcome of the last submit.
    pub fn message(&self) -> Option<String> {
        match &self.state {
            FormState::Blocked(reason) => Some(reason.to_string()),
            _ => self.message.clone(),
        }
    }

    /// Whether mark inputs should be enabled.
    pub fn marks_editable(&self) -> bool {
        self.state == FormState::Unlocked
    }

    pub fn on_submitted(&mut self, callback: impl FnMut(&EvaluationPayload) + Send + 'static) {
        self.on_submitted = Some(Box::new(callback));
    }

    fn ensure_marks_editable(&self) -> Result<(), EvaluationError> {
        match &self.state {
            FormState::Unlocked => Ok(()),
            FormState::Blocked(reason) => Err(EvaluationError::Blocked(reason.clone())),
            FormState::LockedReadOnly => Err(EvaluationError::ReadOnly),
            FormState::NoActiveSession => Err(EvaluationError::NoActiveSession),
            FormState::Submitted => Err(EvaluationError::AlreadySubmitted),
            other => Err(EvaluationError::NotEditable(other.name())),
        }
    }

    fn row_mut(&mut self, enrollment_no: &str) -> Result<&mut StudentRow, EvaluationError> {
        self.rows
            .iter_mut()
            .find(|r| r.enrollment_no == enrollment_no)
            .ok_or_else(|| EvaluationError::UnknownStudent(enrollment_no.to_string()))
    }

    fn criterion_max(&self, field: &str) -> Result<u32, EvaluationError> {
        self.rubric
            .as_ref()
            .and_then(|r| r.criterion(field))
            .map(|c| c.max)
            .ok_or_else(|| EvaluationError::UnknownField(field.to_string()))
    }

    /// Set a mark, clamped to `[0, max]`. Returns the stored value.
    pub fn set_mark(
        &mut self,
        enrollment_no: &str,
        field: &str,
        raw: i64,
    ) -> Result<u32, EvaluationError> {
        self.ensure_marks_editable()?;
        let max = self.criterion_max(field)?;
        let value = sparktrack_rubrics::scoring::clamp_mark(raw, max);
        self.store_mark(enrollment_no, field, Some(value))?;
        Ok(value)
    }

    /// Set a mark from form text. Blank clears the field.
    pub fn set_mark_text(
        &mut self,
        enrollment_no: &str,
        field: &str,
        text: &str,
    ) -> Result<Option<u32>, EvaluationError> {
        self.ensure_marks_editable()?;
        let max = self.criterion_max(field)?;
        let value = parse_mark(text, max)?;
        self.store_mark(enrollment_no, field, value)?;
        Ok(value)
    }

    fn store_mark(
        &mut self,
        enrollment_no: &str,
        field: &str,
        value: Option<u32>,
    ) -> Result<(), EvaluationError> {
        let row = self.row_mut(enrollment_no)?;
        if row.absent {
            return Err(EvaluationError::StudentAbsent(enrollment_no.to_string()));
        }
        row.marks.insert(field.to_string(), value);
        row.recompute_total();
        Ok(())
    }

    /// Marking absent clears every mark and forces the total to `"AB"`.
    /// Unmarking recomputes from the (now empty) fields, so the total resets
    /// to zero; earlier marks are not restored.
    pub fn set_absent(&mut self, enrollment_no: &str, absent: bool) -> Result<(), EvaluationError> {
        self.ensure_marks_editable()?;
        let row = self.row_mut(enrollment_no)?;
        row.absent = absent;
        if absent {
            row.marks.values_mut().for_each(|m| *m = None);
        }
        row.recompute_total();
        Ok(())
    }

    pub fn set_feedback(
        &mut self,
        enrollment_no: &str,
        feedback: impl Into<String>,
    ) -> Result<(), EvaluationError> {
        self.ensure_marks_editable()?;
        self.row_mut(enrollment_no)?.feedback = feedback.into();
        Ok(())
    }

    /// Status fields stay editable while the form is blocked; that is how it
    /// gets unblocked.
    pub fn set_status(
        &mut self,
        field: StatusField,
        status: PublicationStatus,
    ) -> Result<(), EvaluationError> {
        if !self.review.is_some_and(|r| r.has_status_fields()) {
            return Err(EvaluationError::NoStatusFields);
        }
        match &self.state {
            FormState::Unlocked | FormState::Blocked(_) => {}
            _ => return self.ensure_marks_editable(),
        }

        match field {
            StatusField::Copyright => self.statuses.copyright = status,
            StatusField::Patent => self.statuses.patent = status,
            StatusField::ResearchPaper => self.statuses.research_paper = status,
        }
        self.state = self.settled_state();
        Ok(())
    }

    pub fn set_external_details(&mut self, external: ExternalEvaluator) -> Result<(), EvaluationError> {
        match &self.state {
            FormState::Unlocked | FormState::Blocked(_) => {
                self.external = external;
                Ok(())
            }
            _ => self.ensure_marks_editable(),
        }
    }

    /// Normalized submission body. Absent students get `"AB"` in every field.
    pub fn payload(&self) -> Result<EvaluationPayload, EvaluationError> {
        let review = self.review.ok_or(EvaluationError::NoActiveSession)?;
        let students = self
            .rows
            .iter()
            .map(|row| StudentMarks {
                enrollment_no: row.enrollment_no.clone(),
                student_name: row.name.clone(),
                marks: row
                    .marks
                    .iter()
                    .map(|(field, value)| {
                        let mark = if row.absent {
                            Some(MarkValue::Absent)
                        } else {
                            value.map(MarkValue::Score)
                        };
                        (field.clone(), mark)
                    })
                    .collect(),
                total: row.total,
                absent: row.absent,
                feedback: row.feedback.clone(),
            })
            .collect();

        Ok(EvaluationPayload {
            group_id: self.group.group_id.clone(),
            review,
            statuses: review.has_status_fields().then_some(self.statuses),
            external: (self.role == Role::External).then(|| self.external.clone()),
            students,
        })
    }

    /// Validate, post, and settle. Blocked, read-only, sessionless and
    /// already-submitted forms are refused before any request is made.
    pub async fn submit<B: EvaluationBackend>(
        &mut self,
        backend: &B,
    ) -> Result<SubmitOutcome, EvaluationError> {
        self.ensure_marks_editable()?;
        let payload = self.payload()?;

        let previous = std::mem::replace(&mut self.state, FormState::Submitting);
        let result = backend.submit_evaluation(self.role, &payload).await;

        match result {
            Ok(response) if response.success => {
                tracing::info!(
                    group_id = %payload.group_id,
                    review = %payload.review,
                    role = %self.role,
                    "evaluation submitted"
                );
                self.state = FormState::Submitted;
                self.message = response.message.clone();
                if let Some(callback) = self.on_submitted.as_mut() {
                    callback(&payload);
                }
                Ok(SubmitOutcome::Submitted {
                    message: response.message,
                })
            }
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| "submission failed".to_string());
                tracing::warn!(group_id = %payload.group_id, %message, "evaluation rejected");
                self.state = previous;
                self.message = Some(message.clone());
                Ok(SubmitOutcome::Failed { message })
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(group_id = %payload.group_id, error = %message, "evaluation submit failed");
                self.state = previous;
                self.message = Some(message.clone());
                Ok(SubmitOutcome::Failed { message })
            }
        }
    }
}
