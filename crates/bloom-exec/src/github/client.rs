use bloom_core::{DispatchRequest, DispatchResponse, RunnerError, WorkflowClient};
use reqwest::{
    blocking::Client,
    header::{ACCEPT, CONTENT_TYPE},
};
use tracing::{debug, trace};

use crate::{ExecError, metrics::BACKEND_GITHUB};

const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("bloom-agent/", env!("CARGO_PKG_VERSION"));

/// Blocking client for `POST .../actions/workflows/{id}/dispatches`.
///
/// The per-request timeout comes from the [`DispatchRequest`].
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
}

impl GithubClient {
    pub fn new() -> Result<Self, ExecError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ExecError::InvalidBackendConfig(e.to_string()))?;
        Ok(Self { http })
    }
}

impl WorkflowClient for GithubClient {
    fn name(&self) -> &'static str {
        BACKEND_GITHUB
    }

    fn dispatch(&self, req: &DispatchRequest) -> Result<DispatchResponse, RunnerError> {
        let url = req.url();
        trace!(%url, git_ref = %req.body.git_ref, has_inputs = req.body.inputs.is_some(), "sending workflow dispatch");

        let resp = self
            .http
            .post(&url)
            .header(ACCEPT, ACCEPT_GITHUB_V3)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&req.token)
            .json(&req.body)
            .timeout(req.timeout)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    RunnerError::Timeout(req.timeout)
                } else {
                    RunnerError::Transport(e.to_string())
                }
            })?;

        let status = resp.status().as_u16();
        debug!(%url, status, "workflow dispatch answered");
        Ok(DispatchResponse { status })
    }
}
