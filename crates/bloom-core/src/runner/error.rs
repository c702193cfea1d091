use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to start '{program}': {reason}")]
    Spawn { program: String, reason: String },

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("io error: {0}")]
    Io(String),
}

impl RunnerError {
    /// Low-cardinality label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RunnerError::Spawn { .. } => "spawn_failed",
            RunnerError::InvalidCommand(_) => "invalid_command",
            RunnerError::Timeout(_) => "timeout",
            RunnerError::Transport(_) => "transport",
            RunnerError::Io(_) => "io",
        }
    }
}

impl From<std::io::Error> for RunnerError {
    fn from(e: std::io::Error) -> Self {
        RunnerError::Io(e.to_string())
    }
}
