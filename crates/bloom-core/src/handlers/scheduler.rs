use bloom_model::{JobSubmitParams, NodeRecord};

use super::{Backends, HandlerResult, Precondition, target_path};
use crate::runner::CommandSpec;

/// `sbatch <path>/<script>` with the job directory as working directory.
///
/// Only presence of the path is checked; the scheduler reports a missing
/// directory or script itself.
pub(crate) fn submit(
    backends: &Backends<'_>,
    node: &NodeRecord,
    params: &JobSubmitParams,
) -> HandlerResult {
    let path = target_path(node, params.path()).ok_or(Precondition::MissingPath)?;
    let runner = backends.commands()?;

    let cmd = CommandSpec::new("sbatch")
        .arg(path.join(params.script()).display().to_string())
        .current_dir(path);
    Ok(backends.run_to_result(runner, &cmd))
}
