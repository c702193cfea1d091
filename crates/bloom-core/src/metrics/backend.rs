use std::sync::Arc;

use bloom_model::ActionResult;

/// How a triggered action ended, for metrics classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// External call ran and succeeded.
    Success,
    /// External call ran (or could not be made) and failed.
    Failure,
    /// Preconditions failed; nothing was run.
    Rejected,
    /// Action has no implementation.
    Unimplemented,
}

impl ActionOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            ActionOutcome::Success => "success",
            ActionOutcome::Failure => "failure",
            ActionOutcome::Rejected => "rejected",
            ActionOutcome::Unimplemented => "unimplemented",
        }
    }

    /// Classify a result produced by a handler that got past its preconditions.
    pub fn of(result: &ActionResult) -> Self {
        if result.unimplemented {
            ActionOutcome::Unimplemented
        } else if result.ok {
            ActionOutcome::Success
        } else {
            ActionOutcome::Failure
        }
    }
}

/// Backend metrics collection interface.
///
/// Implementations are injected via [`crate::TriggerContext`] and shared by
/// every handler.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record that an action was triggered.
    fn record_action_started(&self, action: &str);

    /// Record action completion with outcome and duration.
    fn record_action_completed(&self, action: &str, outcome: ActionOutcome, duration_ms: u64);

    /// Record a backend error (spawn failure, transport error, ...).
    ///
    /// Separate from action failures, which go through
    /// `record_action_completed` with [`ActionOutcome::Failure`].
    fn record_backend_error(&self, backend: &str, error_kind: &str);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_follows_result_flags() {
        assert_eq!(ActionOutcome::of(&ActionResult::success()), ActionOutcome::Success);
        assert_eq!(ActionOutcome::of(&ActionResult::failure("x")), ActionOutcome::Failure);
        assert_eq!(
            ActionOutcome::of(&ActionResult::unimplemented("x")),
            ActionOutcome::Unimplemented
        );
    }
}
