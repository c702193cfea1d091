//! Backend identifiers reported to the core metrics backend.

/// Subprocess backend name.
pub const BACKEND_SUBPROCESS: &str = "subprocess";

/// GitHub REST backend name.
pub const BACKEND_GITHUB: &str = "github";
