//! Subprocess backend for git, scheduler and shell actions.
//!
//! Runs every [`CommandSpec`](bloom_core::CommandSpec) with
//! `std::process::Command` and waits for it synchronously.
mod config;
mod logger;
mod runner;

pub use logger::LogConfig;
pub use runner::SubprocessRunner;

use std::sync::Arc;

use bloom_core::ActionRouter;

/// Register the built-in subprocess runner in the given router.
///
/// After this call every command-backed action is executed by
/// [`SubprocessRunner`].
pub fn register_subprocess_runner(router: &mut ActionRouter) {
    router.register_command_runner(Arc::new(SubprocessRunner::new()));
}
