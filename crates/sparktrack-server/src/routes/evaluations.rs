use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use sparktrack_core::models::evaluation::{EvaluationRecord, MarkValue, SubmitResponse};
use sparktrack_core::models::group::Group;
use sparktrack_core::models::review::ReviewType;
use sparktrack_core::models::role::Role;
use sparktrack_evaluation::envelope::EvaluationsEnvelope;
use sparktrack_evaluation::payload::{EvaluationPayload, StudentMarks};
use sparktrack_evaluation::resolver::is_review_open;
use sparktrack_evaluation::status::block_reason;
use sparktrack_rubrics::{Rubric, rubric_for};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Roles that read review records through the per-review endpoints.
const REVIEW_READERS: &[Role] = &[Role::External, Role::Admin, Role::ReviewerAdmin];

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub review: u8,
}

async fn load_records(
    state: &AppState,
    user: &AuthUser,
    allowed: &[Role],
    review: ReviewType,
    group_id: &str,
) -> Result<Vec<EvaluationRecord>, ApiError> {
    user.require(allowed)?;
    state
        .store
        .read(|db| -> Result<_, ApiError> {
            db.group(group_id)?;
            Ok(db.evaluations(group_id, review))
        })
        .await
}

pub async fn get_pbl1(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<String>,
) -> Result<Json<EvaluationsEnvelope>, ApiError> {
    let records = load_records(&state, &user, REVIEW_READERS, ReviewType::Review1, &group_id).await?;
    Ok(Json(EvaluationsEnvelope::nested(records)))
}

pub async fn get_pbl2(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<String>,
) -> Result<Json<EvaluationsEnvelope>, ApiError> {
    let evaluations =
        load_records(&state, &user, REVIEW_READERS, ReviewType::Review2, &group_id).await?;
    Ok(Json(EvaluationsEnvelope::Flat { evaluations }))
}

pub async fn get_pbl3(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<String>,
) -> Result<Json<EvaluationsEnvelope>, ApiError> {
    let records = load_records(&state, &user, REVIEW_READERS, ReviewType::Review3, &group_id).await?;
    Ok(Json(EvaluationsEnvelope::Bare(records)))
}

pub async fn get_mentor_students(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<String>,
    Query(query): Query<ReviewQuery>,
) -> Result<Json<EvaluationsEnvelope>, ApiError> {
    let review = ReviewType::from_number(query.review)?;
    let records = load_records(&state, &user, &[Role::Mentor], review, &group_id).await?;
    Ok(Json(EvaluationsEnvelope::nested(records)))
}

pub async fn submit_pbl1(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<EvaluationPayload>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit_external(&state, &user, ReviewType::Review1, payload).await
}

pub async fn submit_pbl2(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<EvaluationPayload>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit_external(&state, &user, ReviewType::Review2, payload).await
}

pub async fn submit_pbl3(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<EvaluationPayload>,
) -> Result<Json<SubmitResponse>, ApiError> {
    submit_external(&state, &user, ReviewType::Review3, payload).await
}

/// Mentors may resubmit; there is no one-shot constraint for them.
pub async fn submit_mentor(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<EvaluationPayload>,
) -> Result<Json<SubmitResponse>, ApiError> {
    user.require(&[Role::Mentor])?;
    save_submission(&state, &user, payload, false).await
}

async fn submit_external(
    state: &AppState,
    user: &AuthUser,
    review: ReviewType,
    payload: EvaluationPayload,
) -> Result<Json<SubmitResponse>, ApiError> {
    user.require(&[Role::External])?;
    if payload.review != review {
        return Err(ApiError::BadRequest(format!(
            "payload is for {} but was sent to the {} endpoint",
            payload.review.label(),
            review.label()
        )));
    }
    save_submission(state, user, payload, true).await
}

/// Check and store one submission. Everything runs under the store's write
/// lock, so two externals racing on the same group cannot both pass the
/// one-shot check.
async fn save_submission(
    state: &AppState,
    user: &AuthUser,
    payload: EvaluationPayload,
    one_shot: bool,
) -> Result<Json<SubmitResponse>, ApiError> {
    let review = payload.review;
    let group_id = payload.group_id.trim().to_string();
    if payload.students.is_empty() || !payload.has_any_mark() {
        return Err(ApiError::BadRequest("Enter marks before submitting".to_string()));
    }

    let now = jiff::Timestamp::now();
    let saved = state
        .store
        .write(|db| -> Result<usize, ApiError> {
            if !is_review_open(db.deadlines.toggles(), review) {
                return Err(ApiError::Forbidden(format!(
                    "{} is not open for submissions",
                    review.label()
                )));
            }

            let group = db.group(&group_id)?.clone();
            if one_shot && db.has_marks(&group_id, review) {
                return Err(ApiError::Conflict(
                    "Evaluation for this group has already been submitted".to_string(),
                ));
            }

            let statuses = payload.statuses.unwrap_or_default();
            if let Some(reason) = block_reason(review, group.year, &statuses) {
                return Err(ApiError::BadRequest(reason.to_string()));
            }

            let rubric = rubric_for(review, group.year);
            let mut records = Vec::with_capacity(payload.students.len());
            for student in &payload.students {
                let mut record = normalize_student(&group, rubric.as_ref(), student)?;
                record.external = payload.external.clone();
                record.statuses = review.has_status_fields().then_some(statuses);
                record.evaluated_by = Some(user.sub.clone());
                record.updated_at = Some(now);
                records.push(record);
            }

            let count = records.len();
            for record in records {
                db.upsert_evaluation(record);
            }
            Ok(count)
        })
        .await?;

    tracing::info!(
        group_id = %group_id,
        review = %review,
        students = saved,
        by = %user.sub,
        role = %user.role,
        "evaluation saved"
    );
    Ok(Json(SubmitResponse::ok(format!(
        "{} marks saved for {saved} students",
        review.label()
    ))))
}

/// Build the stored row for one student: membership checked, unknown fields
/// refused, scores re-clamped to the criterion maximum, total recomputed.
fn normalize_student(
    group: &Group,
    rubric: &dyn Rubric,
    student: &StudentMarks,
) -> Result<EvaluationRecord, ApiError> {
    let member = group
        .members
        .iter()
        .find(|m| m.enrollment_no == student.enrollment_no)
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "{} is not a member of group {}",
                student.enrollment_no, group.group_id
            ))
        })?;

    if let Some(field) = student.marks.keys().find(|f| rubric.criterion(f).is_none()) {
        return Err(ApiError::BadRequest(format!(
            "{}: unknown field '{field}'",
            rubric.name()
        )));
    }

    let mut marks = BTreeMap::new();
    let total = if student.absent {
        for criterion in rubric.criteria() {
            marks.insert(criterion.field.clone(), Some(MarkValue::Absent));
        }
        MarkValue::Absent
    } else {
        for criterion in rubric.criteria() {
            let value = match student.marks.get(&criterion.field).copied().flatten() {
                Some(MarkValue::Score(score)) => {
                    let clamped = criterion.clamp(i64::from(score));
                    if clamped != score {
                        tracing::warn!(
                            enrollment_no = %student.enrollment_no,
                            field = %criterion.field,
                            score,
                            max = criterion.max,
                            "mark clamped"
                        );
                    }
                    Some(MarkValue::Score(clamped))
                }
                Some(MarkValue::Absent) => {
                    return Err(ApiError::BadRequest(format!(
                        "{} has an AB mark but is not marked absent",
                        student.enrollment_no
                    )));
                }
                None => None,
            };
            marks.insert(criterion.field.clone(), value);
        }
        MarkValue::Score(rubric.total(&marks))
    };

    Ok(EvaluationRecord {
        group_id: group.group_id.clone(),
        review: rubric.review(),
        enrollment_no: member.enrollment_no.clone(),
        student_name: member.name.clone(),
        marks,
        total: Some(total),
        absent: student.absent,
        feedback: student.feedback.trim().to_string(),
        external: None,
        statuses: None,
        evaluated_by: None,
        updated_at: None,
    })
}
