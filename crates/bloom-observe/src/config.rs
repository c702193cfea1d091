use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{
    error::LoggerResult,
    object::{LoggerFormat, LoggerLevel, LoggerTimeZone},
};

/// Level filter expression, e.g. `info` or `bloom_core=debug,info`.
pub const ENV_LOG_LEVEL: &str = "BLOOM_LOG";
/// `text`, `json` or `journald`.
pub const ENV_LOG_FORMAT: &str = "BLOOM_LOG_FORMAT";
/// `utc` or `local`.
pub const ENV_LOG_TZ: &str = "BLOOM_LOG_TZ";

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Log level filter expression.
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
    /// Whether to include module/target names in log output.
    pub with_targets: bool,
    /// Whether to use colored output.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Build from `BLOOM_LOG`, `BLOOM_LOG_FORMAT` and `BLOOM_LOG_TZ`.
    pub fn from_env() -> LoggerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; blank values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> LoggerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(level) = get(ENV_LOG_LEVEL) {
            cfg.level = level.parse()?;
        }
        if let Some(format) = get(ENV_LOG_FORMAT) {
            cfg.format = format.parse()?;
        }
        if let Some(tz) = get(ENV_LOG_TZ) {
            cfg.tz = tz.parse()?;
        }
        Ok(cfg)
    }

    /// Color is used only when enabled and stderr is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}
