//! git actions. Every command runs as `git -C <path> ...` against an existing
//! directory.
use bloom_model::{FetchMergeParams, GitParams, NodeRecord, PushMergeParams};
use tracing::warn;

use super::{Backends, HandlerResult, existing_dir, exit_result};
use crate::runner::CommandSpec;

/// `git -C <path> <subcommand> [args...]` for push, fetch and pull.
pub(crate) fn single(
    backends: &Backends<'_>,
    node: &NodeRecord,
    subcommand: &str,
    params: &GitParams,
) -> HandlerResult {
    let path = existing_dir(node, params.path())?;
    let runner = backends.commands()?;

    let cmd = CommandSpec::git(path, subcommand).args(params.args());
    Ok(backends.run_to_result(runner, &cmd))
}

/// `git fetch <remote>`, then `git merge <remote>/<branch>` only if the fetch
/// succeeded.
pub(crate) fn fetch_merge(
    backends: &Backends<'_>,
    node: &NodeRecord,
    params: &FetchMergeParams,
) -> HandlerResult {
    let path = existing_dir(node, params.path())?;
    let runner = backends.commands()?;

    let fetch = CommandSpec::git(path, "fetch").arg(params.remote());
    let out = match backends.run(runner, &fetch) {
        Ok(out) => out,
        Err(res) => return Ok(res),
    };
    if !out.success() {
        return Ok(exit_result(&fetch, &out));
    }

    let merge = CommandSpec::git(path, "merge")
        .arg(format!("{}/{}", params.remote(), params.branch()));
    Ok(backends.run_to_result(runner, &merge))
}

/// `git merge <branch>`, then `git push <remote> [args...]`.
///
/// The merge outcome does not affect control flow or the result: the push
/// runs regardless and alone decides `ok`.
pub(crate) fn push_merge(
    backends: &Backends<'_>,
    node: &NodeRecord,
    params: &PushMergeParams,
) -> HandlerResult {
    let path = existing_dir(node, params.path())?;
    let runner = backends.commands()?;

    let merge = CommandSpec::git(path, "merge").arg(params.branch());
    match backends.run(runner, &merge) {
        Ok(out) if !out.success() => {
            warn!(command = %merge, code = ?out.code, "merge failed, pushing anyway");
        }
        Ok(_) => {}
        Err(res) => {
            warn!(command = %merge, error = ?res.error, "merge did not run, pushing anyway");
        }
    }

    let push = CommandSpec::git(path, "push")
        .arg(params.remote())
        .args(params.args());
    Ok(backends.run_to_result(runner, &push))
}
