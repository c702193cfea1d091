//! Prometheus implementation of [`bloom_core::MetricsBackend`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use bloom_core::{ActionRouter, TriggerContext};
//! use bloom_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let ctx = TriggerContext::default().with_metrics(Arc::new(metrics.clone()));
//! let _router = ActionRouter::new().with_context(ctx);
//!
//! print!("{}", metrics.encode_text()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `bloom_actions_started_total{action}` - Counter
//! - `bloom_actions_completed_total{action, outcome}` - Counter
//! - `bloom_action_duration_seconds{action}` - Histogram
//! - `bloom_backend_errors_total{backend, error_kind}` - Counter
//!
//! No HTTP exposition is provided; callers gather or encode on demand.
mod backend;
pub use backend::PrometheusMetrics;
