//! Per-action parameter records.
//!
//! Every field is optional: presence checks happen in the handlers, which
//! also merge these values with the target [`NodeRecord`](crate::NodeRecord).
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::domain::{DEFAULT_BRANCH, DEFAULT_JOB_SCRIPT, DEFAULT_REF, DEFAULT_REMOTE};

/// Parameters of `workflow_dispatch`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct WorkflowDispatchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Workflow file name or numeric id; numbers are accepted and kept as text.
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    #[serde(
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub workflow_id: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Map<String, Value>>,
}

impl WorkflowDispatchParams {
    pub fn git_ref(&self) -> &str {
        non_empty(&self.git_ref).unwrap_or(DEFAULT_REF)
    }

    /// Inputs to send, `None` when absent or empty.
    pub fn inputs(&self) -> Option<&Map<String, Value>> {
        self.inputs.as_ref().filter(|m| !m.is_empty())
    }
}

/// Parameters of the single-command git actions (`git_push`, `git_fetch`, `pull_merge`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct GitParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

impl GitParams {
    pub fn path(&self) -> Option<&Path> {
        non_empty_path(&self.path)
    }

    pub fn args(&self) -> &[String] {
        self.args.as_deref().unwrap_or_default()
    }
}

/// Parameters of `fetch_merge`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct FetchMergeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl FetchMergeParams {
    pub fn path(&self) -> Option<&Path> {
        non_empty_path(&self.path)
    }

    pub fn remote(&self) -> &str {
        non_empty(&self.remote).unwrap_or(DEFAULT_REMOTE)
    }

    pub fn branch(&self) -> &str {
        non_empty(&self.branch).unwrap_or(DEFAULT_BRANCH)
    }
}

/// Parameters of `push_merge`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct PushMergeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

impl PushMergeParams {
    pub fn path(&self) -> Option<&Path> {
        non_empty_path(&self.path)
    }

    pub fn remote(&self) -> &str {
        non_empty(&self.remote).unwrap_or(DEFAULT_REMOTE)
    }

    pub fn branch(&self) -> &str {
        non_empty(&self.branch).unwrap_or(DEFAULT_BRANCH)
    }

    pub fn args(&self) -> &[String] {
        self.args.as_deref().unwrap_or_default()
    }
}

/// Parameters of `job_submit`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct JobSubmitParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

impl JobSubmitParams {
    pub fn path(&self) -> Option<&Path> {
        non_empty_path(&self.path)
    }

    pub fn script(&self) -> &str {
        non_empty(&self.script).unwrap_or(DEFAULT_JOB_SCRIPT)
    }
}

/// Parameters of `run_script`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct RunScriptParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Shell source, run through `sh -c`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

impl RunScriptParams {
    pub fn path(&self) -> Option<&Path> {
        non_empty_path(&self.path)
    }

    pub fn script(&self) -> Option<&str> {
        non_empty(&self.script)
    }
}

fn non_empty_path(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
