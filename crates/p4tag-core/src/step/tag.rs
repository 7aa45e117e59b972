use std::{sync::Arc, time::Instant};

use p4tag_model::{BuildResult, Env, PromotionRef, TagStepSpec};
use tracing::{debug, error, info, instrument};

use crate::{
    context::HostContext,
    error::{AbortError, LOG_PREFIX, LabelError, StepError},
    expand::Expand,
    host::{Launcher, Run, TagAction, TaskListener, Workspace},
    metrics::StepOutcome,
    step::{BuildStep, LabelOutcome, MetadataSource},
};

/// Step that labels the depot state a run was built from.
///
/// The label name and description come from the configured templates expanded
/// against the run environment. The label itself is applied by the tagging
/// metadata ([`TagAction`]) an earlier step attached to the run, or, for a
/// promotion, to the upstream run being promoted.
pub struct TagStep {
    spec: TagStepSpec,
    ctx: HostContext,
}

impl TagStep {
    pub const NAME: &'static str = "tag";

    pub fn new(spec: TagStepSpec, ctx: HostContext) -> Self {
        Self { spec, ctx }
    }

    pub fn spec(&self) -> &TagStepSpec {
        &self.spec
    }

    /// Label `run` at the end of its build.
    ///
    /// Skipping (success gate) and missing metadata are ordinary outcomes.
    /// Every other failure is logged to the run as `P4: Could not label: <cause>`
    /// and returned as one [`AbortError`].
    #[instrument(level = "debug", skip_all, fields(run = %run.build_ref()))]
    pub fn on_build_complete(
        &self,
        run: &dyn Run,
        workspace: &Workspace,
        listener: &dyn TaskListener,
    ) -> Result<LabelOutcome, AbortError> {
        let started = Instant::now();
        let res = self.label(run, workspace, listener);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let metrics = self.ctx.metrics();

        match res {
            Ok(outcome) => {
                metrics.record_outcome(Self::NAME, outcome.kind(), elapsed_ms);
                debug!(%outcome, "tag step finished");
                Ok(outcome)
            }
            Err(err) => {
                metrics.record_error(Self::NAME, err.kind());
                metrics.record_outcome(Self::NAME, StepOutcome::Aborted, elapsed_ms);

                let abort = AbortError::could_not_label(&err);
                listener.log(abort.message());
                error!(kind = err.kind(), "{abort}");
                Err(abort)
            }
        }
    }

    fn label(
        &self,
        run: &dyn Run,
        workspace: &Workspace,
        listener: &dyn TaskListener,
    ) -> Result<LabelOutcome, LabelError> {
        if self.spec.only_on_success && run.result() != Some(BuildResult::Success) {
            debug!(result = ?run.result(), "only labeling successful builds; skipped");
            return Ok(LabelOutcome::NotRequired);
        }

        let env = run
            .environment(listener)
            .map_err(|e| LabelError::EnvironmentUnavailable(e.to_string()))?;
        let expand = Expand::new(&env);
        let name = expand.format(&self.spec.raw_label_name)?;
        let description = expand.format(&self.spec.raw_label_desc)?;

        let Some((action, source)) = self.resolve_tag_action(&env, run, listener)? else {
            return Ok(LabelOutcome::NoTagInformation);
        };

        info!(label = %name, ?source, %workspace, "labeling build");
        action
            .label_build(listener, &name, &description, workspace)
            .map_err(|e| LabelError::LabelOperation(e.to_string()))?;

        Ok(LabelOutcome::Labeled {
            name,
            description,
            source,
        })
    }

    /// Find the tagging metadata to label with.
    ///
    /// Order:
    /// - metadata attached to `run` itself;
    /// - otherwise, when `PROMOTED_JOB_NAME`/`PROMOTED_NUMBER` are set, the
    ///   metadata of that upstream run.
    ///
    /// `Ok(None)` means there is nothing to label with; the reason has been
    /// logged. A promotion that names a job or build the registry does not
    /// know (or an unparsable number) is an error.
    pub fn resolve_tag_action(
        &self,
        env: &Env,
        run: &dyn Run,
        listener: &dyn TaskListener,
    ) -> Result<Option<(Arc<dyn TagAction>, MetadataSource)>, LabelError> {
        if let Some(action) = run.tag_action() {
            return Ok(Some((action, MetadataSource::Current)));
        }

        let Some(promotion) = PromotionRef::from_env(env) else {
            log(listener, "No tag information; not a promotion job.");
            return Ok(None);
        };
        debug!(job = %promotion.job, number = %promotion.number, "following promotion");

        let number = promotion.build_number().map_err(|e| {
            log(listener, &format!("No tag information; {e}."));
            LabelError::JobOrBuildNotFound(e.to_string())
        })?;

        let Some(job) = self.ctx.registry().item_by_full_name(&promotion.job) else {
            let reason = format!("job '{}' does not exist", promotion.job);
            log(listener, &format!("No tag information; {reason}."));
            return Err(LabelError::JobOrBuildNotFound(reason));
        };

        let Some(upstream) = job.build_by_number(number) else {
            let reason = format!("build {}#{number} does not exist", job.full_name());
            log(listener, &format!("No tag information; {reason}."));
            return Err(LabelError::JobOrBuildNotFound(reason));
        };

        match upstream.tag_action() {
            Some(action) => Ok(Some((
                action,
                MetadataSource::Promoted(upstream.build_ref()),
            ))),
            None => {
                log(listener, "No tag information; is it a valid Perforce job?");
                Ok(None)
            }
        }
    }
}

impl BuildStep for TagStep {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn perform(
        &self,
        run: &dyn Run,
        workspace: &Workspace,
        _launcher: &Launcher,
        listener: &dyn TaskListener,
    ) -> Result<(), StepError> {
        self.on_build_complete(run, workspace, listener)?;
        Ok(())
    }
}

fn log(listener: &dyn TaskListener, msg: &str) {
    listener.log(&format!("{LOG_PREFIX}{msg}"));
}
