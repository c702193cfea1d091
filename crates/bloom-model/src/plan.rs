use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ActionClass, ContextKey, Env};

/// Result of routing a context: which class it fell into and the helper
/// command a caller should run for it.
///
/// The command is described, not executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerPlan {
    pub action: ActionClass,
    pub context_key: Option<ContextKey>,
    /// Shell-ready rendering of `helper`, `None` for `local`.
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper: Option<HelperCommand>,
}

impl TriggerPlan {
    /// Plan with nothing to run.
    pub fn local(context_key: Option<ContextKey>) -> Self {
        Self {
            action: ActionClass::Local,
            context_key,
            command: None,
            helper: None,
        }
    }
}

/// Structured form of a helper-script invocation: environment bindings,
/// the script path and its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperCommand {
    #[serde(default, skip_serializing_if = "Env::is_empty")]
    pub env: Env,
    pub program: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}
