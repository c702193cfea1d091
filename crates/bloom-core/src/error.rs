use std::path::PathBuf;

use bloom_model::ModelError;
use thiserror::Error;

use crate::runner::RunnerError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Could not resolve context_key or action")]
    Unresolved,

    #[error("failed to read agent catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse agent catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("invalid repo name pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("cannot render helper command: {0}")]
    Render(String),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("runner error: {0}")]
    Runner(#[from] RunnerError),
}
