//! Prometheus backend for the label step metrics.
//!
//! [`PrometheusMetrics`] implements [`p4tag_core::MetricsBackend`]; inject it
//! through [`p4tag_core::HostContext::with_metrics`].
//!
//! ```rust
//! use std::sync::Arc;
//! use p4tag_core::HostContext;
//! use p4tag_prometheus::{Encoder, PrometheusMetrics, TextEncoder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let ctx = HostContext::default().with_metrics(Arc::new(metrics.clone()));
//! # let _ = ctx;
//!
//! let mut buf = Vec::new();
//! TextEncoder::new().encode(&metrics.gather(), &mut buf)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `p4tag_label_outcomes_total{step, outcome}` - Counter
//! - `p4tag_label_duration_seconds{step}` - Histogram
//! - `p4tag_label_errors_total{step, error_kind}` - Counter
mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
