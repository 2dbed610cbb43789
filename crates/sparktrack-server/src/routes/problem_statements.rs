use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use sparktrack_core::models::problem_statement::{ProblemStatement, ProblemStatementDraft};
use sparktrack_core::models::role::Role;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn get_problem_statement(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<ProblemStatement>, ApiError> {
    state
        .store
        .read(|db| db.problem_statement(&group_id).cloned())
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no problem statement for group {group_id}")))
}

/// Create or replace a group's problem statement. Locked once any review
/// has recorded a mark for the group.
pub async fn put_problem_statement(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(group_id): Path<String>,
    Json(draft): Json<ProblemStatementDraft>,
) -> Result<Json<ProblemStatement>, ApiError> {
    user.require(&[Role::Mentor])?;
    if draft.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }

    let now = jiff::Timestamp::now();
    let statement = state
        .store
        .write(|db| -> Result<ProblemStatement, ApiError> {
            db.group(&group_id)?;
            if db.evaluation_started(&group_id) {
                return Err(ApiError::Conflict(
                    "Problem statement cannot be changed after evaluation has started".to_string(),
                ));
            }

            let id = db
                .problem_statement(&group_id)
                .map(|existing| existing.id)
                .unwrap_or_else(Uuid::new_v4);
            let statement = ProblemStatement {
                id,
                group_id: group_id.clone(),
                title: draft.title.trim().to_string(),
                kind: draft.kind,
                technology_bucket: draft.technology_bucket,
                domain: draft.domain,
                description: draft.description,
                submitted: draft.submitted,
                updated_at: now,
            };
            db.put_problem_statement(statement.clone());
            Ok(statement)
        })
        .await?;

    tracing::info!(group_id = %group_id, id = %statement.id, by = %user.sub, "problem statement saved");
    Ok(Json(statement))
}
