use std::{fmt, sync::Arc};

use crate::{config::AgentConfig, metrics::MetricsHandle};

/// Shared state handed to every handler the router invokes.
#[derive(Clone)]
pub struct TriggerContext {
    config: Arc<AgentConfig>,
    metrics: MetricsHandle,
}

impl TriggerContext {
    pub fn new(config: Arc<AgentConfig>, metrics: MetricsHandle) -> Self {
        Self { config, metrics }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    /// Replace the configuration and return updated context.
    pub fn with_config(mut self, config: Arc<AgentConfig>) -> Self {
        self.config = config;
        self
    }

    /// Replace the metrics backend and return updated context.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }
}

impl Default for TriggerContext {
    fn default() -> Self {
        Self {
            config: Arc::new(AgentConfig::default()),
            metrics: crate::metrics::noop_metrics(),
        }
    }
}

impl fmt::Debug for TriggerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerContext")
            .field("config", &self.config)
            .field("metrics", &"<handle>")
            .finish()
    }
}
