//! Capabilities the tagging step consumes from the CI host.
//!
//! The host owns runs, jobs and the tagging metadata attached by earlier
//! steps; the step only reads them. Implementations must be shareable across
//! threads, but every call is synchronous.
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use p4tag_model::{BuildNumber, BuildRef, BuildResult, Env};

use crate::error::HostError;

/// Line-oriented sink for the run's console log.
pub trait TaskListener: Send + Sync {
    fn log(&self, line: &str);
}

/// Tagging metadata recorded for a run by an earlier (sync) step.
///
/// Knows how to label the depot state the run was built from.
pub trait TagAction: Send + Sync {
    /// Apply label `name` with `description` for the files in `workspace`.
    fn label_build(
        &self,
        listener: &dyn TaskListener,
        name: &str,
        description: &str,
        workspace: &Workspace,
    ) -> Result<(), HostError>;
}

/// One execution of a job, as seen by a build step.
pub trait Run: Send + Sync {
    /// Job and build number of this run.
    fn build_ref(&self) -> BuildRef;

    /// Result so far; `None` while the run has not been assigned one.
    fn result(&self) -> Option<BuildResult>;

    /// Capture the run environment.
    fn environment(&self, listener: &dyn TaskListener) -> Result<Env, HostError>;

    /// Tagging metadata attached to this run, if any.
    fn tag_action(&self) -> Option<Arc<dyn TagAction>>;
}

/// Host-side control over a run, used by the pipeline and never by steps.
pub trait RunControl: Run {
    fn set_result(&self, result: BuildResult);
}

/// A job and its build history.
pub trait Job: Send + Sync {
    fn full_name(&self) -> &str;

    fn build_by_number(&self, number: BuildNumber) -> Option<Arc<dyn Run>>;
}

/// Lookup of jobs by full name.
pub trait JobRegistry: Send + Sync {
    fn item_by_full_name(&self, name: &str) -> Option<Arc<dyn Job>>;
}

/// File tree materialized for a run. Passed through to the label call untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    path: PathBuf,
}

impl Workspace {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Node the run executes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    node: String,
}

impl Launcher {
    pub fn new(node: impl Into<String>) -> Self {
        Self { node: node.into() }
    }

    /// Launcher for the controller's own executor.
    pub fn built_in() -> Self {
        Self::new("built-in")
    }

    pub fn node(&self) -> &str {
        &self.node
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::built_in()
    }
}
