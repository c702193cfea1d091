use std::{fmt, time::Duration};

use serde::Serialize;
use serde_json::{Map, Value};

/// JSON body of a workflow dispatch request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchBody {
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Map<String, Value>>,
}

/// Fully resolved workflow dispatch request.
#[derive(Clone, PartialEq)]
pub struct DispatchRequest {
    pub api_host: String,
    pub owner: String,
    pub repo: String,
    pub workflow_id: String,
    pub body: DispatchBody,
    pub token: String,
    pub timeout: Duration,
}

impl DispatchRequest {
    /// `{api_host}/repos/{owner}/{repo}/actions/workflows/{workflow_id}/dispatches`.
    pub fn url(&self) -> String {
        format!(
            "{}/repos/{}/{}/actions/workflows/{}/dispatches",
            self.api_host.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.workflow_id
        )
    }
}

impl fmt::Debug for DispatchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchRequest")
            .field("url", &self.url())
            .field("body", &self.body)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Status returned by the VCS host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResponse {
    pub status: u16,
}

impl DispatchResponse {
    /// Statuses below 400 count as accepted.
    pub fn accepted(&self) -> bool {
        self.status < 400
    }
}
