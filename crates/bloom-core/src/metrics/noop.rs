use crate::metrics::backend::{ActionOutcome, MetricsBackend};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_action_started(&self, _: &str) {}

    #[inline(always)]
    fn record_action_completed(&self, _: &str, _: ActionOutcome, _: u64) {}

    #[inline(always)]
    fn record_backend_error(&self, _: &str, _: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_metrics_is_zero_size() {
        assert_eq!(std::mem::size_of::<NoOpMetrics>(), 0);
    }
}
