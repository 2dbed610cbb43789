use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use super::auth::AuthUser;

/// Audit logging middleware.
///
/// Logs every API request as a structured `api_request` event. The caller's
/// identity is included when the auth layer admitted one.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    match response.extensions().get::<AuthUser>() {
        Some(user) => tracing::info!(
            method = %method,
            path = %uri,
            status = status,
            user = %user.sub,
            role = %user.role,
            "api_request"
        ),
        None => tracing::info!(
            method = %method,
            path = %uri,
            status = status,
            "api_request"
        ),
    }

    response
}
