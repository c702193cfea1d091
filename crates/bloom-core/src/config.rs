//! Process-wide agent configuration.
//!
//! Built once at startup (usually from the environment) and shared by
//! reference with the router; nothing in this crate reads the environment
//! after construction.
use std::{fmt, path::PathBuf, time::Duration};

use bloom_model::{
    DEFAULT_API_HOST, ENV_API_HOST, ENV_CONTEXT_KEY, ENV_GITHUB_TOKEN, ENV_PROJECTS_DIR,
    ENV_SCRIPTS_DIR,
};

/// Timeout applied to VCS host API requests.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Directory searched for helper scripts when nothing else is configured.
pub const DEFAULT_SCRIPTS_DIR: &str = "scripts";

#[derive(Clone)]
pub struct AgentConfig {
    github_token: Option<String>,
    api_host: String,
    projects_dir: Option<PathBuf>,
    default_context_key: Option<String>,
    scripts_dir: PathBuf,
    http_timeout: Duration,
}

impl AgentConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            github_token: get(ENV_GITHUB_TOKEN),
            api_host: get(ENV_API_HOST).unwrap_or(defaults.api_host),
            projects_dir: get(ENV_PROJECTS_DIR).map(PathBuf::from),
            default_context_key: get(ENV_CONTEXT_KEY),
            scripts_dir: get(ENV_SCRIPTS_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.scripts_dir),
            http_timeout: defaults.http_timeout,
        }
    }

    pub fn with_github_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = Some(token.into());
        self
    }

    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    pub fn with_projects_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.projects_dir = Some(dir.into());
        self
    }

    pub fn with_default_context_key(mut self, key: impl Into<String>) -> Self {
        self.default_context_key = Some(key.into());
        self
    }

    pub fn with_scripts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scripts_dir = dir.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref()
    }

    /// API base URL without a trailing slash.
    pub fn api_host(&self) -> &str {
        self.api_host.trim_end_matches('/')
    }

    pub fn projects_dir(&self) -> Option<&PathBuf> {
        self.projects_dir.as_ref()
    }

    pub fn default_context_key(&self) -> Option<&str> {
        self.default_context_key.as_deref()
    }

    pub fn scripts_dir(&self) -> &PathBuf {
        &self.scripts_dir
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            api_host: DEFAULT_API_HOST.to_string(),
            projects_dir: None,
            default_context_key: None,
            scripts_dir: PathBuf::from(DEFAULT_SCRIPTS_DIR),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("api_host", &self.api_host)
            .field("projects_dir", &self.projects_dir)
            .field("default_context_key", &self.default_context_key)
            .field("scripts_dir", &self.scripts_dir)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}
