//! One handler per action family.
//!
//! A handler validates its inputs, performs at most the external calls listed
//! for its action and folds the outcome into an [`ActionResult`]. Missing
//! inputs are reported as [`Precondition`] so the router can tell "nothing
//! ran" apart from "ran and failed".
use std::path::Path;

use bloom_model::{ActionResult, NodeRecord};
use tracing::{debug, warn};

use crate::{
    config::AgentConfig,
    metrics::MetricsHandle,
    runner::{CommandOutput, CommandRunner, CommandSpec, WorkflowClient},
};

mod precondition;
pub use precondition::Precondition;

pub(crate) mod git;
pub(crate) mod notify;
pub(crate) mod scheduler;
pub(crate) mod script;
pub(crate) mod workflow;

pub(crate) type HandlerResult = Result<ActionResult, Precondition>;

/// Everything a handler may touch while serving one trigger.
pub(crate) struct Backends<'a> {
    pub config: &'a AgentConfig,
    pub metrics: &'a MetricsHandle,
    pub commands: Option<&'a dyn CommandRunner>,
    pub workflows: Option<&'a dyn WorkflowClient>,
}

impl<'a> Backends<'a> {
    fn commands(&self) -> Result<&'a dyn CommandRunner, Precondition> {
        self.commands.ok_or(Precondition::NoBackend("command"))
    }

    fn workflows(&self) -> Result<&'a dyn WorkflowClient, Precondition> {
        self.workflows.ok_or(Precondition::NoBackend("workflow"))
    }

    /// Run one command; a backend error becomes a failed result.
    fn run(&self, runner: &dyn CommandRunner, cmd: &CommandSpec) -> Result<CommandOutput, ActionResult> {
        debug!(backend = runner.name(), command = %cmd, "running command");
        runner.run(cmd).map_err(|e| {
            warn!(backend = runner.name(), command = %cmd, error = %e, "command could not run");
            self.metrics.record_backend_error(runner.name(), e.kind());
            ActionResult::failure(e.to_string())
        })
    }

    /// Run one command and judge it by its exit code alone.
    fn run_to_result(&self, runner: &dyn CommandRunner, cmd: &CommandSpec) -> ActionResult {
        match self.run(runner, cmd) {
            Ok(out) => exit_result(cmd, &out),
            Err(res) => res,
        }
    }
}

/// Map a finished command to an [`ActionResult`].
pub(crate) fn exit_result(cmd: &CommandSpec, out: &CommandOutput) -> ActionResult {
    match out.code {
        Some(0) => ActionResult::success().with_data("exit_code", 0),
        Some(code) => ActionResult::failure(format!("{} exited with code {code}", cmd.program()))
            .with_data("exit_code", code),
        None => ActionResult::failure(format!("{} terminated by signal", cmd.program())),
    }
}

/// Node path first, payload path as fallback.
pub(crate) fn target_path<'a>(node: &'a NodeRecord, payload: Option<&'a Path>) -> Option<&'a Path> {
    node.path().or(payload)
}

/// Like [`target_path`], but the path must name an existing directory.
pub(crate) fn existing_dir<'a>(
    node: &'a NodeRecord,
    payload: Option<&'a Path>,
) -> Result<&'a Path, Precondition> {
    target_path(node, payload)
        .filter(|p| p.is_dir())
        .ok_or(Precondition::MissingPath)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use super::Backends;
    use crate::{
        config::AgentConfig,
        metrics::{MetricsHandle, noop_metrics},
        runner::fakes::{RecordingClient, RecordingRunner},
    };

    /// Owned pieces that a [`Backends`] borrows from.
    pub(crate) struct Rig {
        pub config: AgentConfig,
        pub metrics: MetricsHandle,
        pub runner: Arc<RecordingRunner>,
        pub client: Arc<RecordingClient>,
    }

    impl Rig {
        pub(crate) fn new(runner: RecordingRunner, client: RecordingClient) -> Self {
            Self {
                config: AgentConfig::default().with_github_token("ghp_test"),
                metrics: noop_metrics(),
                runner: Arc::new(runner),
                client: Arc::new(client),
            }
        }

        pub(crate) fn commands(runner: RecordingRunner) -> Self {
            Self::new(runner, RecordingClient::with_status(204))
        }

        pub(crate) fn backends(&self) -> Backends<'_> {
            Backends {
                config: &self.config,
                metrics: &self.metrics,
                commands: Some(self.runner.as_ref()),
                workflows: Some(self.client.as_ref()),
            }
        }
    }
}
