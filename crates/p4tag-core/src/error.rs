use std::fmt;

use thiserror::Error;

/// Prefix of every line the tagging step writes to a run log.
pub const LOG_PREFIX: &str = "P4: ";

/// Failure reported by a host collaborator (environment capture, label call).
#[derive(Debug, Error)]
pub enum HostError {
    #[error("{0}")]
    Failed(String),
}

/// Diagnostic classes of a labeling failure.
///
/// Every variant is fatal for the run; the split exists for logs and metrics only.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("environment unavailable: {0}")]
    EnvironmentUnavailable(String),

    #[error("bad template '{template}': {reason}")]
    TemplateExpansion { template: String, reason: String },

    #[error("job or build not found: {0}")]
    JobOrBuildNotFound(String),

    #[error("label operation failed: {0}")]
    LabelOperation(String),
}

impl LabelError {
    /// Stable, low-cardinality name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            LabelError::EnvironmentUnavailable(_) => "environment_unavailable",
            LabelError::TemplateExpansion { .. } => "template_expansion",
            LabelError::JobOrBuildNotFound(_) => "job_or_build_not_found",
            LabelError::LabelOperation(_) => "label_operation",
        }
    }
}

/// Fatal signal handed back to the host; aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbortError {
    message: String,
    kind: &'static str,
}

impl AbortError {
    /// Wrap a labeling failure as `P4: Could not label: <cause>`.
    pub fn could_not_label(cause: &LabelError) -> Self {
        Self {
            message: format!("{LOG_PREFIX}Could not label: {cause}"),
            kind: cause.kind(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Failure class of the wrapped cause (see [`LabelError::kind`]).
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Display for AbortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AbortError {}

/// Error returned by a [`crate::BuildStep`].
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Abort(#[from] AbortError),

    #[error("step '{step}' failed: {reason}")]
    Failed { step: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn could_not_label_embeds_cause() {
        let cause = LabelError::LabelOperation("connection refused".into());
        let abort = AbortError::could_not_label(&cause);

        assert_eq!(
            abort.message(),
            "P4: Could not label: label operation failed: connection refused"
        );
        assert_eq!(abort.kind(), "label_operation");
        assert_eq!(abort.to_string(), abort.message());
    }

    #[test]
    fn step_error_is_transparent_over_abort() {
        let abort = AbortError::could_not_label(&LabelError::LabelOperation("stop".into()));
        let err: StepError = abort.clone().into();
        assert_eq!(err.to_string(), abort.message());
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            LabelError::EnvironmentUnavailable(String::new()).kind(),
            LabelError::TemplateExpansion {
                template: String::new(),
                reason: String::new(),
            }
            .kind(),
            LabelError::JobOrBuildNotFound(String::new()).kind(),
            LabelError::LabelOperation(String::new()).kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
