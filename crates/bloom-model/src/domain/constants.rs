//! Common model-level constants.
//!
//! Well-known environment variable names and payload defaults shared by the
//! resolver, the handlers and the CLI.

/// Environment variable holding the VCS host bearer token.
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// Environment variable overriding the VCS host API base URL.
pub const ENV_API_HOST: &str = "GITHUB_API_URL";

/// Environment variable naming the default projects directory.
///
/// Also the name of the binding passed to the sync helper script.
pub const ENV_PROJECTS_DIR: &str = "PROJECTS_DIR";

/// Environment variable carrying a default explicit context key.
///
/// Also the name of the binding passed to both helper scripts.
pub const ENV_CONTEXT_KEY: &str = "CONTEXT_KEY";

/// Environment variable pointing at the directory with helper scripts.
pub const ENV_SCRIPTS_DIR: &str = "BLOOM_SCRIPTS_DIR";

/// Default VCS host API base URL.
pub const DEFAULT_API_HOST: &str = "https://api.github.com";

/// Git ref used by `workflow_dispatch` when the payload has none.
pub const DEFAULT_REF: &str = "main";

/// Remote used by merge-style git actions when the payload has none.
pub const DEFAULT_REMOTE: &str = "origin";

/// Branch used by merge-style git actions when the payload has none.
pub const DEFAULT_BRANCH: &str = "main";

/// Batch script submitted by `job_submit` when the payload has none.
pub const DEFAULT_JOB_SCRIPT: &str = "job.sh";
