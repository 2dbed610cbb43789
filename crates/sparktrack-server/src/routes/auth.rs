use axum::Json;
use axum::extract::State;

use sparktrack_auth::{jwt, password};
use sparktrack_core::models::auth::{LoginRequest, LoginResponse, ValidateRequest, ValidateResponse};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = req.username.trim();
    let account = state.store.read(|db| db.user(username).cloned()).await;

    let Some(account) = account.filter(|a| password::verify_password(&req.password, &a.password_hash))
    else {
        tracing::warn!(username, "login rejected");
        return Err(ApiError::Unauthorized("invalid username or password".to_string()));
    };

    let token = jwt::issue_token(
        &account.username,
        account.role,
        state.token_ttl,
        &state.jwt_secret,
        jiff::Timestamp::now(),
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(username = %account.username, role = %account.role, "login succeeded");
    Ok(Json(LoginResponse {
        token,
        role: account.role,
    }))
}

/// Server-side revalidation for the client session gate. Always answers 200;
/// a bad token is `{ "valid": false }`.
pub async fn validate(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Json<ValidateResponse> {
    match jwt::validate_token(req.token.trim(), &state.jwt_secret) {
        Ok(session) => Json(ValidateResponse {
            valid: true,
            role: Some(session.role),
        }),
        Err(e) => {
            tracing::debug!(error = %e, "token failed validation");
            Json(ValidateResponse {
                valid: false,
                role: None,
            })
        }
    }
}
