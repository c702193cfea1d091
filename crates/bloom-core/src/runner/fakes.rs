//! In-memory backends that record every call and replay scripted results.
use std::{collections::VecDeque, sync::Mutex};

use super::{
    CommandOutput, CommandRunner, CommandSpec, DispatchRequest, DispatchResponse, RunnerError,
    WorkflowClient,
};

/// Command runner that answers each call with the next scripted result.
///
/// When the script runs out every further call exits with code 0.
#[derive(Default)]
pub(crate) struct RecordingRunner {
    calls: Mutex<Vec<CommandSpec>>,
    script: Mutex<VecDeque<Result<CommandOutput, RunnerError>>>,
}

impl RecordingRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn exits(codes: &[i32]) -> Self {
        let runner = Self::new();
        for &code in codes {
            runner.push(Ok(CommandOutput::from_code(code)));
        }
        runner
    }

    pub(crate) fn push(&self, result: Result<CommandOutput, RunnerError>) {
        self.script.lock().unwrap().push_back(result);
    }

    pub(crate) fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls rendered as command lines, for compact assertions.
    pub(crate) fn lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, RunnerError> {
        self.calls.lock().unwrap().push(cmd.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CommandOutput::from_code(0)))
    }
}

/// Workflow client that records requests and answers with a fixed status.
pub(crate) struct RecordingClient {
    calls: Mutex<Vec<DispatchRequest>>,
    status: Mutex<Option<u16>>,
}

impl RecordingClient {
    pub(crate) fn with_status(status: u16) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            status: Mutex::new(Some(status)),
        }
    }

    /// Every call fails with a transport error.
    pub(crate) fn unreachable() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            status: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> Vec<DispatchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl WorkflowClient for RecordingClient {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn dispatch(&self, req: &DispatchRequest) -> Result<DispatchResponse, RunnerError> {
        self.calls.lock().unwrap().push(req.clone());
        match *self.status.lock().unwrap() {
            Some(status) => Ok(DispatchResponse { status }),
            None => Err(RunnerError::Transport("connection refused".into())),
        }
    }
}
