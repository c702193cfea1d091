use std::process::{Command, Stdio};

use bloom_core::{CommandOutput, CommandRunner, CommandSpec, OutputMode, RunnerError};
use tracing::{debug, trace};

use crate::{
    metrics::BACKEND_SUBPROCESS,
    subprocess::{config, logger::LogConfig},
};

/// Runs commands as OS subprocesses and waits for them.
///
/// No timeout is enforced; a hung child blocks the caller.
#[derive(Debug, Clone)]
pub struct SubprocessRunner {
    name: &'static str,
    log: LogConfig,
}

impl SubprocessRunner {
    /// Create a subprocess runner with default output logging.
    pub fn new() -> Self {
        Self {
            name: BACKEND_SUBPROCESS,
            log: LogConfig::default(),
        }
    }

    /// Create a subprocess runner with explicit output logging.
    pub fn with_log_config(log: LogConfig) -> Self {
        Self {
            name: BACKEND_SUBPROCESS,
            log,
        }
    }

    fn build(&self, spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(spec.program());
        cmd.args(spec.get_args());
        if let Some(cwd) = spec.cwd() {
            cmd.current_dir(cwd);
        }
        for kv in spec.get_env().iter() {
            cmd.env(kv.key(), kv.value());
        }
        cmd
    }
}

impl Default for SubprocessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SubprocessRunner {
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunnerError> {
        config::validate(spec)?;
        config::trace_state(spec);

        let mut cmd = self.build(spec);
        let spawn_err = |e: std::io::Error| RunnerError::Spawn {
            program: spec.program().to_string(),
            reason: e.to_string(),
        };

        let output = match spec.output_mode() {
            OutputMode::Capture => {
                cmd.stdin(Stdio::null());
                let out = cmd.output().map_err(spawn_err)?;
                let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
                self.log.log_stdout(spec.program(), &stdout);
                self.log.log_stderr(spec.program(), &stderr);
                CommandOutput {
                    code: out.status.code(),
                    stdout,
                    stderr,
                }
            }
            OutputMode::Inherit => {
                let status = cmd.status().map_err(spawn_err)?;
                CommandOutput {
                    code: status.code(),
                    ..Default::default()
                }
            }
        };

        match output.code {
            Some(0) => debug!(command = %spec, "subprocess exited successfully"),
            Some(code) => debug!(command = %spec, code, "subprocess exited with non-zero code"),
            None => debug!(command = %spec, "subprocess terminated by signal"),
        }
        trace!(stdout_len = output.stdout.len(), stderr_len = output.stderr.len(), "subprocess output collected");
        Ok(output)
    }
}
