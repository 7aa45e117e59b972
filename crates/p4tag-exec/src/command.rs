use std::{fmt, path::PathBuf};

use p4tag_model::Env;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ExecError;

/// Variable holding the expanded label name while the command runs.
pub const ENV_LABEL_NAME: &str = "LABEL_NAME";

/// Variable holding the expanded label description while the command runs.
pub const ENV_LABEL_DESC: &str = "LABEL_DESC";

/// External program that applies a label.
///
/// `args` are templates expanded against the run environment plus
/// [`ENV_LABEL_NAME`] and [`ENV_LABEL_DESC`]; the same variables are exported
/// to the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct LabelCommand {
    /// Program to execute (e.g. `"p4"`).
    pub command: String,
    /// Argument templates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Extra variables for the process; override run variables.
    #[serde(default, skip_serializing_if = "Env::is_empty")]
    pub env: Env,
    /// Working directory. If `None`, the run workspace is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl LabelCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            env: Env::new(),
            cwd: None,
        }
    }

    /// Builder-style: append argument templates.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Validate before running.
    ///
    /// Rules:
    /// - `command` is not empty or whitespace-only.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.command.trim().is_empty() {
            return Err(ExecError::InvalidSpec("label command is empty".into()));
        }
        Ok(())
    }

    /// Emit a trace-level log with the resolved invocation.
    pub(crate) fn trace_state(&self, args: &[String], cwd: &std::path::Path) {
        trace!(
            command = %self.command,
            args = ?args,
            cwd = %cwd.display(),
            env_len = self.env.len(),
            "label command resolved"
        );
    }
}

impl fmt::Display for LabelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LabelCommand(cmd='{}', args={}, env={}, cwd={:?})",
            self.command,
            self.args.len(),
            self.env.len(),
            self.cwd,
        )
    }
}
