use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("invalid payload for {action}: {reason}")]
    InvalidPayload { action: String, reason: String },

    #[error("unknown action class: {0}")]
    UnknownActionClass(String),

    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("unknown model family: {0}")]
    UnknownModelFamily(String),

    #[error("unknown receiver: {0}")]
    UnknownReceiver(String),

    #[error("unknown action client: {0}")]
    UnknownActionClient(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
