use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::action::params::{
    FetchMergeParams, GitParams, JobSubmitParams, PushMergeParams, RunScriptParams,
    WorkflowDispatchParams,
};
use crate::error::{ModelError, ModelResult};

/// Open action payload as received from callers: string keys to arbitrary JSON.
pub type Payload = Map<String, Value>;

/// Closed set of actions a node can be triggered with.
///
/// Serialized with an `action` tag next to the parameter fields, e.g.
/// `{"action": "fetch_merge", "remote": "upstream"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionKind {
    /// Dispatch a CI workflow on the VCS host.
    WorkflowDispatch(WorkflowDispatchParams),
    /// `git push [args...]`.
    GitPush(GitParams),
    /// `git fetch [args...]`.
    GitFetch(GitParams),
    /// `git fetch <remote>`, then `git merge <remote>/<branch>`.
    FetchMerge(FetchMergeParams),
    /// `git merge <branch>`, then `git push <remote> [args...]`.
    PushMerge(PushMergeParams),
    /// `git pull [args...]`.
    PullMerge(GitParams),
    /// Submit `<path>/<script>` to the batch scheduler.
    JobSubmit(JobSubmitParams),
    /// Run a shell snippet inside the node directory.
    RunScript(RunScriptParams),
    /// Reserved; has no implementation.
    Notify,
}

impl ActionKind {
    /// Every action name, in dispatch-table order.
    pub const NAMES: [&'static str; 9] = [
        "workflow_dispatch",
        "git_push",
        "git_fetch",
        "fetch_merge",
        "push_merge",
        "pull_merge",
        "job_submit",
        "run_script",
        "notify",
    ];

    /// Returns the action name as a static string.
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::WorkflowDispatch(_) => "workflow_dispatch",
            ActionKind::GitPush(_) => "git_push",
            ActionKind::GitFetch(_) => "git_fetch",
            ActionKind::FetchMerge(_) => "fetch_merge",
            ActionKind::PushMerge(_) => "push_merge",
            ActionKind::PullMerge(_) => "pull_merge",
            ActionKind::JobSubmit(_) => "job_submit",
            ActionKind::RunScript(_) => "run_script",
            ActionKind::Notify => "notify",
        }
    }

    /// Build a typed action from its name and an open payload.
    ///
    /// Unknown fields are ignored. Fields that are present with the wrong JSON
    /// type are reported as [`ModelError::InvalidPayload`].
    pub fn from_payload(action: &str, payload: &Payload) -> ModelResult<Self> {
        let kind = match action {
            "workflow_dispatch" => ActionKind::WorkflowDispatch(parse(action, payload)?),
            "git_push" => ActionKind::GitPush(parse(action, payload)?),
            "git_fetch" => ActionKind::GitFetch(parse(action, payload)?),
            "fetch_merge" => ActionKind::FetchMerge(parse(action, payload)?),
            "push_merge" => ActionKind::PushMerge(parse(action, payload)?),
            "pull_merge" => ActionKind::PullMerge(parse(action, payload)?),
            "job_submit" => ActionKind::JobSubmit(parse(action, payload)?),
            "run_script" => ActionKind::RunScript(parse(action, payload)?),
            "notify" => ActionKind::Notify,
            other => return Err(ModelError::UnknownAction(other.to_string())),
        };
        Ok(kind)
    }
}

fn parse<T: DeserializeOwned>(action: &str, payload: &Payload) -> ModelResult<T> {
    serde_json::from_value(Value::Object(payload.clone())).map_err(|e| {
        ModelError::InvalidPayload {
            action: action.to_string(),
            reason: e.to_string(),
        }
    })
}
