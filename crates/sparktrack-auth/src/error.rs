use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token has no role claim")]
    MissingRole,

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("session validation failed: {0}")]
    Validation(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
