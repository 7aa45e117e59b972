//! Configuration file of the `p4tag` tool.

use std::{path::Path, str::FromStr};

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use p4tag_exec::LabelCommand;
use p4tag_model::{BuildNumber, BuildResult, Env, TagStepSpec};
use p4tag_observe::LoggerConfig;

/// Configuration for `p4tag`, read from the file given by `--config`.
///
/// ```toml
/// [step]
/// rawLabelName = "jenkins-${JOB_NAME}-${BUILD_NUMBER}"
/// rawLabelDesc = "Built at change ${P4_CHANGELIST}"
///
/// [labeler]
/// command = "p4"
/// args = ["tag", "-l", "${LABEL_NAME}", "//depot/...@${P4_CHANGELIST}"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging setup.
    pub logger: LoggerConfig,

    /// The tag step to run. Required by `p4tag label`.
    pub step: Option<TagStepSpec>,

    /// Command that applies a label. Without it no run carries tagging
    /// metadata.
    pub labeler: Option<LabelCommand>,

    /// Earlier runs, looked up when labeling a promotion.
    pub history: Vec<HistoryEntry>,
}

/// A recorded run of some job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct HistoryEntry {
    pub job: String,
    pub number: BuildNumber,
    /// Environment the run was built with; `P4_CHANGELIST` marks a synced run.
    #[serde(default)]
    pub env: Env,
    #[serde(default)]
    pub result: Option<BuildResult>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(?path, "loading config");
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        text.parse()
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// The validated tag step.
    pub fn step(&self) -> Result<&TagStepSpec> {
        let step = self.step.as_ref().context("config has no [step] table")?;
        step.validate()?;
        Ok(step)
    }
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}
