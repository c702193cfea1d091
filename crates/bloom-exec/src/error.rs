use bloom_core::RunnerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid command: {0}")]
    InvalidSpec(String),

    #[error("invalid backend configuration: {0}")]
    InvalidBackendConfig(String),
}

impl From<ExecError> for RunnerError {
    fn from(e: ExecError) -> Self {
        match e {
            ExecError::InvalidSpec(msg) | ExecError::InvalidBackendConfig(msg) => {
                RunnerError::InvalidCommand(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_errors_surface_as_invalid_command() {
        let err = RunnerError::from(ExecError::InvalidSpec("program is empty".into()));
        assert!(matches!(err, RunnerError::InvalidCommand(ref m) if m == "program is empty"));
        assert_eq!(err.kind(), "invalid_command");

        let err = RunnerError::from(ExecError::InvalidBackendConfig("tls".into()));
        assert!(matches!(err, RunnerError::InvalidCommand(_)));
    }
}
