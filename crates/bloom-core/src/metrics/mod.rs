//! Metrics collection abstraction for action dispatch.
//!
//! The router reports every trigger through a [`MetricsBackend`]; backends
//! (prometheus, ...) live in their own crates and are injected via
//! [`crate::TriggerContext`].
mod backend;
pub use backend::{ActionOutcome, MetricsBackend, MetricsHandle};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
