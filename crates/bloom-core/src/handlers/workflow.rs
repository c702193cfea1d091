use bloom_model::{ActionResult, NodeRecord, WorkflowDispatchParams};
use tracing::{info, warn};

use super::{Backends, HandlerResult, Precondition};
use crate::runner::{DispatchBody, DispatchRequest};

/// Dispatch a CI workflow on the VCS host.
///
/// `owner` comes from the node, then the payload; `repo` from the node, then
/// the payload, then the node slug. The token is read from configuration and
/// never from the payload.
pub(crate) fn dispatch(
    backends: &Backends<'_>,
    node: &NodeRecord,
    params: &WorkflowDispatchParams,
) -> HandlerResult {
    let owner = node.owner().or(non_empty(&params.owner));
    let repo = node
        .repo()
        .or(non_empty(&params.repo))
        .or(node.slug());
    let workflow_id = non_empty(&params.workflow_id);

    let (Some(owner), Some(repo), Some(workflow_id)) = (owner, repo, workflow_id) else {
        return Err(Precondition::MissingTarget);
    };
    let token = backends
        .config
        .github_token()
        .ok_or(Precondition::MissingToken)?;
    let client = backends.workflows()?;

    let req = DispatchRequest {
        api_host: backends.config.api_host().to_string(),
        owner: owner.to_string(),
        repo: repo.to_string(),
        workflow_id: workflow_id.to_string(),
        body: DispatchBody {
            git_ref: params.git_ref().to_string(),
            inputs: params.inputs().cloned(),
        },
        token: token.to_string(),
        timeout: backends.config.http_timeout(),
    };

    let res = match client.dispatch(&req) {
        Ok(resp) if resp.accepted() => {
            info!(url = %req.url(), status = resp.status, "workflow dispatched");
            ActionResult::success().with_data("status", resp.status)
        }
        Ok(resp) => {
            warn!(url = %req.url(), status = resp.status, "workflow dispatch rejected");
            ActionResult::failure(format!("HTTP {}", resp.status)).with_data("status", resp.status)
        }
        Err(e) => {
            warn!(url = %req.url(), error = %e, "workflow dispatch failed");
            backends.metrics.record_backend_error(client.name(), e.kind());
            ActionResult::failure(e.to_string())
        }
    };
    Ok(res)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
