//! In-process host for one `p4tag label` invocation.
//!
//! The current run and every `[[history]]` entry become [`MemoryRun`]s in a
//! [`MemoryRegistry`]. A run carries tagging metadata when it was synced
//! (`P4_CHANGELIST` is set) and a labeler command is configured.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use p4tag_core::{
    AbortError, HostContext, LabelOutcome, MetricsHandle, TagAction, TagStep, TaskListener,
    Workspace,
    memory::{MemoryRegistry, MemoryRun},
};
use p4tag_exec::{CommandTagAction, LabelCommand};
use p4tag_model::{BuildRef, BuildResult, ENV_P4_CHANGELIST, Env};

use crate::config::Config;

/// What to label: the run being completed.
#[derive(Debug, Clone)]
pub struct LabelRequest {
    pub build: BuildRef,
    pub env: Env,
    pub result: Option<BuildResult>,
    pub workspace: Workspace,
}

/// Tagging metadata a synced run would have recorded.
pub fn metadata_for(env: &Env, labeler: Option<&LabelCommand>) -> Result<Option<Arc<dyn TagAction>>> {
    let (Some(_), Some(labeler)) = (env.get_non_empty(ENV_P4_CHANGELIST), labeler) else {
        return Ok(None);
    };
    let action = CommandTagAction::new(labeler.clone(), env.clone())?;
    Ok(Some(Arc::new(action)))
}

/// Registry holding every configured history entry.
pub fn build_registry(config: &Config) -> Result<Arc<MemoryRegistry>> {
    let registry = Arc::new(MemoryRegistry::new());
    for entry in &config.history {
        let mut run = MemoryRun::new(BuildRef::new(&entry.job, entry.number), entry.env.clone());
        if let Some(result) = entry.result {
            run = run.with_result(result);
        }
        if let Some(action) = metadata_for(&entry.env, config.labeler.as_ref())? {
            run = run.with_tag_action(action);
        }
        registry.add_run(run);
    }
    debug!(jobs = ?registry.job_names(), "history loaded");
    Ok(registry)
}

/// Run the tag step for `request`.
///
/// The outer `Result` covers setup problems; the inner one is the step's
/// own verdict.
pub fn label(
    config: &Config,
    request: LabelRequest,
    metrics: MetricsHandle,
    listener: &dyn TaskListener,
) -> Result<Result<LabelOutcome, AbortError>> {
    let spec = config.step()?.clone();
    let registry = build_registry(config)?;

    let mut run = MemoryRun::new(request.build, request.env);
    if let Some(result) = request.result {
        run = run.with_result(result);
    }
    if let Some(action) = metadata_for(run.env(), config.labeler.as_ref())? {
        run = run.with_tag_action(action);
    }
    let run = registry.add_run(run);

    let step = TagStep::new(spec, HostContext::new(registry, metrics));
    let res = step.on_build_complete(run.as_ref(), &request.workspace, listener);
    if let Ok(outcome) = &res {
        info!(%outcome, "tag step done");
    }
    Ok(res)
}
