use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("not logged in")]
    NotLoggedIn,

    #[error("session file error: {0}")]
    SessionFile(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Evaluation(#[from] sparktrack_evaluation::error::EvaluationError),
}

impl ClientError {
    /// The message worth showing inline to the user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status { message, .. } => message.clone(),
            ClientError::Http(_) => "Could not reach the server. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}
