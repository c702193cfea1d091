//! Workflow dispatch over the GitHub REST API.
mod client;

pub use client::GithubClient;

use std::sync::Arc;

use bloom_core::ActionRouter;

use crate::ExecError;

/// Register a [`GithubClient`] in the given router.
pub fn register_github_client(router: &mut ActionRouter) -> Result<(), ExecError> {
    router.register_workflow_client(Arc::new(GithubClient::new()?));
    Ok(())
}
