use std::fmt;

use serde::{Deserialize, Serialize};

/// Sequential number of a run within its job.
pub type BuildNumber = u32;

/// Identity of a single run: owning job full name plus build number.
///
/// Rendered as `job#number`, the way hosts print run links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct BuildRef {
    pub job: String,
    pub number: BuildNumber,
}

impl BuildRef {
    pub fn new(job: impl Into<String>, number: BuildNumber) -> Self {
        Self {
            job: job.into(),
            number,
        }
    }
}

impl fmt::Display for BuildRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.job, self.number)
    }
}
