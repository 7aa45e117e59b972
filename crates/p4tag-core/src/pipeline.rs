//! Sequential step runner standing in for the host's build loop.
//!
//! Runs every registered [`BuildStep`] in order against one run and assigns
//! the final result. The first step error aborts the remaining steps.
use std::sync::Arc;

use p4tag_model::BuildResult;
use tracing::{debug, instrument, warn};

use crate::{
    host::{Launcher, Run, RunControl, TaskListener, Workspace},
    step::BuildStep,
};

#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Arc<dyn BuildStep>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Builder-style [`Pipeline::push`].
    pub fn step(mut self, step: Arc<dyn BuildStep>) -> Self {
        self.push(step);
        self
    }

    /// Append a step; steps run in registration order.
    pub fn push(&mut self, step: Arc<dyn BuildStep>) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run all steps and return the result assigned to `run`.
    ///
    /// Logs `Running on <node> in <workspace>` first, as hosts do.
    ///
    /// Result rules:
    /// - a step error sets `FAILURE` (or keeps a worse result already set);
    /// - otherwise `SUCCESS` unless a step already set something worse.
    #[instrument(level = "debug", skip_all, fields(run = %run.build_ref(), steps = self.steps.len()))]
    pub fn run<R: RunControl>(
        &self,
        run: &R,
        workspace: &Workspace,
        launcher: &Launcher,
        listener: &dyn TaskListener,
    ) -> BuildResult {
        listener.log(&format!("Running on {} in {workspace}", launcher.node()));
        for step in &self.steps {
            listener.log(&format!("[Pipeline] {}", step.name()));
            debug!(step = step.name(), "running step");

            if let Err(err) = step.perform(run, workspace, launcher, listener) {
                listener.log(&format!("ERROR: {err}"));
                warn!(step = step.name(), error = %err, "step aborted the run");
                return finish(run, BuildResult::Failure, listener);
            }
        }
        finish(run, BuildResult::Success, listener)
    }
}

fn finish<R: RunControl>(run: &R, result: BuildResult, listener: &dyn TaskListener) -> BuildResult {
    let result = run.result().map_or(result, |r| r.combine(result));
    run.set_result(result);
    listener.log(&format!("Finished: {result}"));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::StepError,
        memory::{BufferListener, MemoryRun},
    };
    use p4tag_model::{BuildRef, Env};

    struct Echo(&'static str);

    impl BuildStep for Echo {
        fn name(&self) -> &'static str {
            self.0
        }

        fn perform(
            &self,
            _: &dyn Run,
            _: &Workspace,
            _: &Launcher,
            listener: &dyn TaskListener,
        ) -> Result<(), StepError> {
            listener.log(self.0);
            Ok(())
        }
    }

    struct Broken;

    impl BuildStep for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn perform(
            &self,
            _: &dyn Run,
            _: &Workspace,
            _: &Launcher,
            _: &dyn TaskListener,
        ) -> Result<(), StepError> {
            Err(StepError::Failed {
                step: "broken",
                reason: "boom".into(),
            })
        }
    }

    fn run() -> MemoryRun {
        MemoryRun::new(BuildRef::new("demo", 1), Env::new())
    }

    #[test]
    fn empty_pipeline_succeeds() {
        let run = run();
        let listener = BufferListener::new();
        let result = Pipeline::new().run(
            &run,
            &Workspace::new("/ws/demo"),
            &Launcher::new("agent-1"),
            &listener,
        );

        assert_eq!(result, BuildResult::Success);
        assert_eq!(run.result(), Some(BuildResult::Success));
        assert_eq!(
            listener.lines(),
            vec!["Running on agent-1 in /ws/demo", "Finished: SUCCESS"]
        );
    }

    #[test]
    fn steps_run_in_order_and_stop_at_error() {
        let run = run();
        let listener = BufferListener::new();
        let pipeline = Pipeline::new()
            .step(Arc::new(Echo("one")))
            .step(Arc::new(Broken))
            .step(Arc::new(Echo("never")));
        assert_eq!(pipeline.len(), 3);

        let result = pipeline.run(&run, &Workspace::new("."), &Launcher::default(), &listener);

        assert_eq!(result, BuildResult::Failure);
        assert!(listener.contains("ERROR: step 'broken' failed: boom"));
        assert!(!listener.contains("never"));
        assert_eq!(listener.lines().last().map(String::as_str), Some("Finished: FAILURE"));
    }

    #[test]
    fn worse_result_is_kept() {
        let run = run().with_result(BuildResult::Unstable);
        let listener = BufferListener::new();
        let result = Pipeline::new()
            .step(Arc::new(Echo("one")))
            .run(&run, &Workspace::new("."), &Launcher::default(), &listener);

        assert_eq!(result, BuildResult::Unstable);
    }
}
