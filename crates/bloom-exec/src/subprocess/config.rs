use bloom_core::CommandSpec;
use tracing::trace;

use crate::ExecError;

/// Validate a command before spawning it.
///
/// Rules:
/// - the program is not empty or whitespace-only;
/// - the working directory, when set, is an existing directory.
pub(crate) fn validate(cmd: &CommandSpec) -> Result<(), ExecError> {
    if cmd.program().trim().is_empty() {
        return Err(ExecError::InvalidSpec("program is empty".into()));
    }
    if let Some(cwd) = cmd.cwd() {
        if !cwd.is_dir() {
            return Err(ExecError::InvalidSpec(format!(
                "working directory does not exist: {}",
                cwd.display()
            )));
        }
    }
    Ok(())
}

/// Emit a trace-level log with the essential command fields.
pub(crate) fn trace_state(cmd: &CommandSpec) {
    trace!(
        program = %cmd.program(),
        args = ?cmd.get_args(),
        cwd = ?cmd.cwd(),
        env_len = cmd.get_env().len(),
        output = ?cmd.output_mode(),
        "subprocess command resolved"
    );
}
