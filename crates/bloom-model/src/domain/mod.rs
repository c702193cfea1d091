mod kv;
pub use kv::KeyValue;

mod env;
pub use env::Env;

mod constants;
pub use constants::{
    DEFAULT_API_HOST, DEFAULT_BRANCH, DEFAULT_JOB_SCRIPT, DEFAULT_REF, DEFAULT_REMOTE,
    ENV_API_HOST, ENV_CONTEXT_KEY, ENV_GITHUB_TOKEN, ENV_PROJECTS_DIR, ENV_SCRIPTS_DIR,
};
