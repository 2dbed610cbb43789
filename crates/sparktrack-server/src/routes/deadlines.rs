use axum::extract::{Path, State};
use axum::{Extension, Json};

use sparktrack_core::models::deadline::{DeadlineToggle, SetDeadlineRequest};
use sparktrack_core::models::role::Role;
use sparktrack_evaluation::envelope::DeadlinesEnvelope;
use sparktrack_evaluation::resolver::ActiveReviewResponse;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn list_deadlines(State(state): State<AppState>) -> Json<DeadlinesEnvelope> {
    let data = state
        .store
        .read(|db| db.deadlines.toggles().to_vec())
        .await;
    Json(DeadlinesEnvelope::Data { data })
}

pub async fn set_deadline(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(key): Path<String>,
    Json(req): Json<SetDeadlineRequest>,
) -> Result<Json<DeadlineToggle>, ApiError> {
    user.require(&[Role::Admin])?;

    let toggle = state
        .store
        .write(|db| {
            db.deadlines
                .set(&key, req.enabled)
                .cloned()
                .map_err(ApiError::from)
        })
        .await?;

    tracing::info!(key = %toggle.key, enabled = toggle.enabled, by = %user.sub, "deadline toggled");
    Ok(Json(toggle))
}

pub async fn active_review(
    State(state): State<AppState>,
) -> Result<Json<ActiveReviewResponse>, ApiError> {
    let active_review = state.store.read(|db| db.deadlines.active_review()).await?;
    Ok(Json(ActiveReviewResponse { active_review }))
}
