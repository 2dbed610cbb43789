use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("group id has no SY/TY/LY year prefix: {0}")]
    InvalidGroupId(String),

    #[error("invalid review number: {0}")]
    InvalidReview(u8),

    #[error("invalid mark value: {0}")]
    InvalidMark(String),

    #[error("invalid publication status: {0}")]
    InvalidStatus(String),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
