use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::LoggerError;

const DEFAULT_LEVEL: &str = "info";

/// Validated `EnvFilter` expression, e.g. `info` or
/// `bloom_exec=trace,bloom_core=debug,info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    pub fn new(s: impl Into<String>) -> Result<Self, LoggerError> {
        Self::try_from(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the filter. The expression was validated on construction.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.as_str()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self(DEFAULT_LEVEL.to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match EnvFilter::try_new(&s) {
            Ok(_) => Ok(LoggerLevel(s)),
            Err(e) => Err(LoggerError::InvalidLevel(format!("{s}: {e}"))),
        }
    }
}

impl From<LoggerLevel> for String {
    fn from(l: LoggerLevel) -> Self {
        l.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_levels() {
        for lvl in ["info", "warn", "trace", "bloom_exec=trace,bloom_core=debug,info"] {
            let parsed = lvl.parse::<LoggerLevel>();
            assert!(parsed.is_ok(), "expected valid level for {lvl}, got: {parsed:?}");
        }
    }

    #[test]
    fn rejects_invalid_levels() {
        for lvl in ["bloom_core=lol", "other=trace,another=wat"] {
            assert!(
                LoggerLevel::from_str(lvl).is_err(),
                "expected error for {lvl}"
            );
        }
    }

    #[test]
    fn serde_from_plain_string() {
        let lvl: LoggerLevel = serde_json::from_str(r#""debug""#).unwrap();
        assert_eq!(lvl.as_str(), "debug");
        assert!(serde_json::from_str::<LoggerLevel>(r#""x=nope""#).is_err());
    }

    #[test]
    fn default_is_info() {
        assert_eq!(LoggerLevel::default().as_str(), "info");
        let _ = LoggerLevel::default().to_env_filter();
    }
}
