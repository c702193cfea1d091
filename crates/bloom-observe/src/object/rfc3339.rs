use std::fmt;

use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

use crate::object::LoggerTimeZone;

/// RFC3339 timestamp formatter with a fixed offset.
///
/// The offset is resolved once when the logger is built.
#[derive(Debug, Clone, Copy)]
pub struct LoggerRfc3339 {
    offset: UtcOffset,
}

impl LoggerRfc3339 {
    pub fn new(tz: LoggerTimeZone) -> Self {
        Self {
            offset: tz.offset(),
        }
    }

    fn format_now(&self) -> Option<String> {
        OffsetDateTime::now_utc()
            .to_offset(self.offset)
            .format(&Rfc3339)
            .ok()
    }
}

impl FormatTime for LoggerRfc3339 {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        match self.format_now() {
            Some(ts) => write!(w, "{ts} "),
            None => write!(w, "<invalid-time> "),
        }
    }
}
