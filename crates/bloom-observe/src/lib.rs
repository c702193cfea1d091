//! Logging bootstrap for bloom binaries.
//!
//! Every format writes to stderr (or journald), leaving stdout to command
//! results.
mod config;
mod error;
mod init;
mod object;

pub use config::{ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_LOG_TZ, LoggerConfig};
pub use error::{LoggerError, LoggerResult};
pub use object::{LoggerFormat, LoggerLevel, LoggerRfc3339, LoggerTimeZone};

/// Initializes the global tracing subscriber with the given configuration.
///
/// With [`LoggerTimeZone::Local`] the offset is detected here, once; call
/// this before spawning threads or detection falls back to UTC.
///
/// # Examples
/// ```rust
/// use bloom_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// init_logger(&config).expect("Failed to initialize logger");
///
/// tracing::info!("Logger initialized successfully");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => init::logger_text(cfg),
        LoggerFormat::Json => init::logger_json(cfg),
        LoggerFormat::Journald => init::logger_journald(cfg),
    }
}
