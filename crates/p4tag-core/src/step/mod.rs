//! Build step abstraction and the tagging step.
//!
//! A host runs steps in order against one run; a step that returns
//! [`StepError`] aborts the run.
mod outcome;
pub use outcome::{LabelOutcome, MetadataSource};

mod tag;
pub use tag::TagStep;

use crate::{
    error::StepError,
    host::{Launcher, Run, TaskListener, Workspace},
};

/// Extension point invoked by the host once per run.
pub trait BuildStep: Send + Sync {
    /// Step name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Execute the step.
    ///
    /// `workspace` and `launcher` are host handles; steps pass them through.
    fn perform(
        &self,
        run: &dyn Run,
        workspace: &Workspace,
        launcher: &Launcher,
        listener: &dyn TaskListener,
    ) -> Result<(), StepError>;
}
