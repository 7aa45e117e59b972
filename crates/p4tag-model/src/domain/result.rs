use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Final status of a run.
///
/// Variants are declared from best to worst, so the derived ordering reads
/// as severity: `Success < Unstable < Failure < NotBuilt < Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildResult {
    /// All steps completed normally.
    Success,
    /// Completed, but with test failures or warnings.
    Unstable,
    /// A step failed.
    Failure,
    /// The run never reached its build steps.
    NotBuilt,
    /// The run was interrupted.
    Aborted,
}

impl BuildResult {
    /// Canonical upper-case name, as hosts print it.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildResult::Success => "SUCCESS",
            BuildResult::Unstable => "UNSTABLE",
            BuildResult::Failure => "FAILURE",
            BuildResult::NotBuilt => "NOT_BUILT",
            BuildResult::Aborted => "ABORTED",
        }
    }

    /// Keep the worse of two results.
    #[inline]
    pub fn combine(self, other: BuildResult) -> BuildResult {
        self.max(other)
    }
}

impl FromStr for BuildResult {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_uppercase().replace('-', "_");
        match norm.as_str() {
            "SUCCESS" => Ok(Self::Success),
            "UNSTABLE" => Ok(Self::Unstable),
            "FAILURE" => Ok(Self::Failure),
            "NOT_BUILT" => Ok(Self::NotBuilt),
            "ABORTED" => Ok(Self::Aborted),
            _ => Err(ModelError::UnknownResult(s.to_string())),
        }
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
