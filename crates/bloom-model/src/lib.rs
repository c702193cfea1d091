mod domain;
pub use domain::{
    DEFAULT_API_HOST, DEFAULT_BRANCH, DEFAULT_JOB_SCRIPT, DEFAULT_REF, DEFAULT_REMOTE,
    ENV_API_HOST, ENV_CONTEXT_KEY, ENV_GITHUB_TOKEN, ENV_PROJECTS_DIR, ENV_SCRIPTS_DIR,
};
pub use domain::{Env, KeyValue};

mod error;
pub use error::{ModelError, ModelResult};

mod node;
pub use node::NodeRecord;

mod context;
pub use context::{ActionClass, ContextKey, ContextQuery, Environment, ModelFamily};

mod action;
pub use action::{
    ActionKind, FetchMergeParams, GitParams, JobSubmitParams, Payload, PushMergeParams,
    RunScriptParams, WorkflowDispatchParams,
};

mod result;
pub use result::ActionResult;

mod plan;
pub use plan::{HelperCommand, TriggerPlan};

mod catalog;
pub use catalog::{CatalogDocument, FilterAgent, TriggerAgentSpec};

mod filter;
pub use filter::{ActionClient, Receiver};
