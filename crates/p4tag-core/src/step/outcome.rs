use std::fmt;

use p4tag_model::BuildRef;

use crate::metrics::StepOutcome;

/// Where the tagging metadata used for a label came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// The run being completed.
    Current,
    /// The upstream run named by the promotion variables.
    Promoted(BuildRef),
}

/// Non-fatal result of the tagging step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelOutcome {
    /// `onlyOnSuccess` is set and the run did not succeed.
    NotRequired,
    /// Neither the run nor a promotion source carries tagging metadata.
    NoTagInformation,
    /// The label call completed.
    Labeled {
        name: String,
        description: String,
        source: MetadataSource,
    },
}

impl LabelOutcome {
    pub fn is_labeled(&self) -> bool {
        matches!(self, LabelOutcome::Labeled { .. })
    }

    /// Metrics classification.
    pub fn kind(&self) -> StepOutcome {
        match self {
            LabelOutcome::NotRequired => StepOutcome::NotRequired,
            LabelOutcome::NoTagInformation => StepOutcome::NoTagInformation,
            LabelOutcome::Labeled { .. } => StepOutcome::Labeled,
        }
    }
}

impl fmt::Display for LabelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelOutcome::NotRequired => f.write_str("label not required"),
            LabelOutcome::NoTagInformation => f.write_str("no tag information"),
            LabelOutcome::Labeled {
                name,
                source: MetadataSource::Current,
                ..
            } => write!(f, "labeled '{name}'"),
            LabelOutcome::Labeled {
                name,
                source: MetadataSource::Promoted(upstream),
                ..
            } => write!(f, "labeled '{name}' from promoted build {upstream}"),
        }
    }
}
