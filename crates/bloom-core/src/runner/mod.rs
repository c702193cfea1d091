//! Backend seams used by the action handlers.
//!
//! Handlers never talk to the OS or the network directly: they describe one
//! external call and hand it to a [`CommandRunner`] or a [`WorkflowClient`].
//! Concrete implementations live in `bloom-exec` and are plugged into the
//! router at setup time.
mod error;
pub use error::RunnerError;

mod command;
pub use command::{CommandOutput, CommandSpec, OutputMode};

mod dispatch;
pub use dispatch::{DispatchBody, DispatchRequest, DispatchResponse};

#[cfg(test)]
pub(crate) mod fakes;

/// Executes one local command and waits for it to finish.
pub trait CommandRunner: Send + Sync {
    /// Backend name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Run the command to completion.
    ///
    /// A non-zero exit is not an error: it is reported through
    /// [`CommandOutput::code`]. Errors are reserved for commands that could
    /// not be started or waited on.
    fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, RunnerError>;
}

/// Sends workflow dispatch requests to the VCS host.
pub trait WorkflowClient: Send + Sync {
    /// Backend name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Issue the request and return the HTTP status.
    ///
    /// Any status, including 4xx/5xx, is a successful round trip; errors are
    /// reserved for transport failures and timeouts.
    fn dispatch(&self, req: &DispatchRequest) -> Result<DispatchResponse, RunnerError>;
}
