use crate::metrics::backend::{MetricsBackend, StepOutcome};

/// Metrics backend that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_outcome(&self, _: &str, _: StepOutcome, _: u64) {}

    #[inline(always)]
    fn record_error(&self, _: &str, _: &str) {}
}
