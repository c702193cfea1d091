use std::sync::Arc;

use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use bloom_core::{ActionOutcome, MetricsBackend};

const NAMESPACE: &str = "bloom";

/// Prometheus metrics backend for action dispatch.
///
/// ## Label cardinality
/// All labels are bounded:
/// - `action`: the nine action names plus `unknown`
/// - `outcome`: "success", "failure", "rejected", "unimplemented"
/// - `backend`: "subprocess", "github"
/// - `error_kind`: "spawn_failed", "timeout", "transport", ...
#[derive(Clone)]
pub struct PrometheusMetrics {
    actions_started: CounterVec,
    actions_completed: CounterVec,
    action_duration: HistogramVec,
    backend_errors: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a metrics backend registered in a custom registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let actions_started = CounterVec::new(
            Opts::new("actions_started_total", "Total number of actions triggered")
                .namespace(NAMESPACE),
            &["action"],
        )?;
        registry.register(Box::new(actions_started.clone()))?;

        let actions_completed = CounterVec::new(
            Opts::new("actions_completed_total", "Total number of actions finished")
                .namespace(NAMESPACE),
            &["action", "outcome"],
        )?;
        registry.register(Box::new(actions_completed.clone()))?;

        let action_duration = HistogramVec::new(
            HistogramOpts::new("action_duration_seconds", "Action duration in seconds")
                .namespace(NAMESPACE)
                .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 15.0, 60.0, 300.0]),
            &["action"],
        )?;
        registry.register(Box::new(action_duration.clone()))?;

        let backend_errors = CounterVec::new(
            Opts::new("backend_errors_total", "Total backend-level errors").namespace(NAMESPACE),
            &["backend", "error_kind"],
        )?;
        registry.register(Box::new(backend_errors.clone()))?;

        Ok(Self {
            actions_started,
            actions_completed,
            action_duration,
            backend_errors,
            registry,
        })
    }

    /// Create a metrics backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render all metrics in the text exposition format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_action_started(&self, action: &str) {
        self.actions_started.with_label_values(&[action]).inc();
    }

    fn record_action_completed(&self, action: &str, outcome: ActionOutcome, duration_ms: u64) {
        self.actions_completed
            .with_label_values(&[action, outcome.as_label()])
            .inc();

        let duration_seconds = duration_ms as f64 / 1000.0;
        self.action_duration
            .with_label_values(&[action])
            .observe(duration_seconds);
    }

    fn record_backend_error(&self, backend: &str, error_kind: &str) {
        self.backend_errors
            .with_label_values(&[backend, error_kind])
            .inc();
    }
}
