use bloom_model::{NodeRecord, RunScriptParams};

use super::{Backends, HandlerResult, Precondition, target_path};
use crate::runner::{CommandSpec, OutputMode};

/// `sh -c <script>` inside the node directory, output passed through.
pub(crate) fn run(
    backends: &Backends<'_>,
    node: &NodeRecord,
    params: &RunScriptParams,
) -> HandlerResult {
    let path = target_path(node, params.path());
    let (Some(path), Some(script)) = (path, params.script()) else {
        return Err(Precondition::MissingPathOrScript);
    };
    let runner = backends.commands()?;

    let cmd = CommandSpec::shell(script)
        .current_dir(path)
        .output(OutputMode::Inherit);
    Ok(backends.run_to_result(runner, &cmd))
}
