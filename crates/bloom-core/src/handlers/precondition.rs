use thiserror::Error;

/// A required input was missing; the handler made no external call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("missing owner/repo/workflow_id")]
    MissingTarget,

    #[error("GITHUB_TOKEN not set")]
    MissingToken,

    #[error("missing path")]
    MissingPath,

    #[error("missing path/script")]
    MissingPathOrScript,

    #[error("no {0} backend registered")]
    NoBackend(&'static str),
}
