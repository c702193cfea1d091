use tracing::{debug, info, warn};

/// Configuration for subprocess output logging.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    /// Max line length before truncation.
    pub max_line_length: usize,
    /// Log stdout at INFO level (false = DEBUG).
    pub stdout_info: bool,
    /// Log stderr at WARN level (false = DEBUG).
    pub stderr_warn: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_line_length: 4096,
            stdout_info: false,
            stderr_warn: true,
        }
    }
}

impl LogConfig {
    pub(crate) fn log_stdout(&self, program: &str, text: &str) {
        for line in text.lines() {
            let line = truncate(line, self.max_line_length);
            if self.stdout_info {
                info!(program, stream = "stdout", "{line}");
            } else {
                debug!(program, stream = "stdout", "{line}");
            }
        }
    }

    pub(crate) fn log_stderr(&self, program: &str, text: &str) {
        for line in text.lines() {
            let line = truncate(line, self.max_line_length);
            if self.stderr_warn {
                warn!(program, stream = "stderr", "{line}");
            } else {
                debug!(program, stream = "stderr", "{line}");
            }
        }
    }
}

/// Cut `line` to at most `max` bytes on a char boundary.
fn truncate(line: &str, max: usize) -> &str {
    if line.len() <= max {
        return line;
    }
    let mut end = max;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}
