use axum::extract::{Path, State};
use axum::{Extension, Json};

use sparktrack_core::models::group::{Group, NewGroup};
use sparktrack_core::models::role::Role;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn list_groups(State(state): State<AppState>) -> Json<Vec<Group>> {
    let groups = state
        .store
        .read(|db| db.groups.values().cloned().collect())
        .await;
    Json(groups)
}

pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<Group>, ApiError> {
    let group = state
        .store
        .read(|db| db.group(&group_id).cloned())
        .await?;
    Ok(Json(group))
}

pub async fn create_group(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(new_group): Json<NewGroup>,
) -> Result<Json<Group>, ApiError> {
    user.require(&[Role::Admin])?;

    let group = new_group.into_group()?;
    let created = group.clone();
    state
        .store
        .write(|db| db.add_group(group).map_err(ApiError::from))
        .await?;

    tracing::info!(group_id = %created.group_id, year = %created.year, "group created");
    Ok(Json(created))
}
