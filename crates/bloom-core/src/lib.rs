pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
mod handlers;
pub mod metrics;
pub mod router;
pub mod runner;

pub use catalog::AgentCatalog;
pub use config::AgentConfig;
pub use context::{classify, derive_environment, resolve_context_key};
pub use error::CoreError;
pub use filter::{
    RepoPattern, filter_by_action_client, filter_by_action_where, filter_by_receiver,
    filter_by_repo_name,
};
pub use handlers::Precondition;
pub use metrics::{ActionOutcome, MetricsBackend, MetricsHandle, NoOpMetrics, noop_metrics};
pub use router::{ActionRouter, Resolution, TriggerContext};
pub use runner::{
    CommandOutput, CommandRunner, CommandSpec, DispatchBody, DispatchRequest, DispatchResponse,
    OutputMode, RunnerError, WorkflowClient,
};

pub mod prelude {
    pub use crate::config::AgentConfig;
    pub use crate::error::CoreError;
    pub use crate::router::{ActionRouter, Resolution, TriggerContext};
    pub use crate::runner::{CommandRunner, RunnerError, WorkflowClient};
}
