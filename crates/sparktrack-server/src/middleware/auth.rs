use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use sparktrack_auth::jwt;
use sparktrack_core::models::role::Role;

use crate::error::ApiError;
use crate::state::AppState;

/// JWT validation middleware.
///
/// Extracts the `Authorization: Bearer <token>` header and verifies the
/// signature, expiry and role claim. On success, inserts [`AuthUser`] into
/// request extensions for handlers to use, and copies it onto the response
/// for the audit log.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let session = jwt::validate_token(token, &state.jwt_secret)?;
    let user = AuthUser {
        sub: session.subject_id,
        role: session.role,
    };

    req.extensions_mut().insert(user.clone());
    let mut response = next.run(req).await;
    response.extensions_mut().insert(user);
    Ok(response)
}

/// Authenticated user extracted from verified JWT claims.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub sub: String,
    pub role: Role,
}

impl AuthUser {
    pub fn require(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "role {} may not access this resource",
                self.role
            )))
        }
    }
}
