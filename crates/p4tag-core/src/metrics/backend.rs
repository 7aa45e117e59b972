use std::sync::Arc;

/// How a step invocation ended, for metrics classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A label was applied.
    Labeled,
    /// The success gate skipped the run.
    NotRequired,
    /// No tagging metadata for the run or its promotion source.
    NoTagInformation,
    /// The step aborted the run.
    Aborted,
}

impl StepOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            StepOutcome::Labeled => "labeled",
            StepOutcome::NotRequired => "not_required",
            StepOutcome::NoTagInformation => "no_tag_information",
            StepOutcome::Aborted => "aborted",
        }
    }
}

/// Backend metrics collection interface.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record one finished step invocation.
    ///
    /// # Arguments
    /// - `step`: step name (see [`crate::BuildStep::name`])
    /// - `outcome`: how the invocation ended
    /// - `duration_ms`: wall time spent in the step
    fn record_outcome(&self, step: &str, outcome: StepOutcome, duration_ms: u64);

    /// Record the failure class behind an [`StepOutcome::Aborted`] invocation.
    fn record_error(&self, step: &str, error_kind: &str);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
