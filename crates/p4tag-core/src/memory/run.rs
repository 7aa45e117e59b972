use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use p4tag_model::{BuildRef, BuildResult, ENV_BUILD_NUMBER, ENV_JOB_NAME, Env};

use crate::{
    error::HostError,
    host::{Run, RunControl, TagAction, TaskListener},
};

/// Run held in memory.
///
/// The environment always carries `JOB_NAME` and `BUILD_NUMBER` for the run;
/// explicit variables override them.
pub struct MemoryRun {
    build: BuildRef,
    env: Env,
    env_error: Option<String>,
    result: RwLock<Option<BuildResult>>,
    tag_action: RwLock<Option<Arc<dyn TagAction>>>,
}

impl MemoryRun {
    pub fn new(build: BuildRef, env: Env) -> Self {
        let mut base = Env::new();
        base.insert(ENV_JOB_NAME, build.job.as_str())
            .insert(ENV_BUILD_NUMBER, build.number.to_string());

        Self {
            env: base.merged(&env),
            build,
            env_error: None,
            result: RwLock::new(None),
            tag_action: RwLock::new(None),
        }
    }

    /// Builder-style: set the initial result.
    pub fn with_result(self, result: BuildResult) -> Self {
        *self.result.write().unwrap_or_else(PoisonError::into_inner) = Some(result);
        self
    }

    /// Builder-style: attach tagging metadata.
    pub fn with_tag_action(self, action: Arc<dyn TagAction>) -> Self {
        self.attach_tag_action(action);
        self
    }

    /// Builder-style: make [`Run::environment`] fail with `reason`.
    pub fn with_environment_error(mut self, reason: impl Into<String>) -> Self {
        self.env_error = Some(reason.into());
        self
    }

    /// Attach tagging metadata, replacing any previous one (single slot).
    pub fn attach_tag_action(&self, action: Arc<dyn TagAction>) {
        *self
            .tag_action
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(action);
    }

    /// Environment as stored, without going through [`Run::environment`].
    pub fn env(&self) -> &Env {
        &self.env
    }
}

impl Run for MemoryRun {
    fn build_ref(&self) -> BuildRef {
        self.build.clone()
    }

    fn result(&self) -> Option<BuildResult> {
        *self.result.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn environment(&self, _listener: &dyn TaskListener) -> Result<Env, HostError> {
        match &self.env_error {
            Some(reason) => Err(HostError::Failed(reason.clone())),
            None => Ok(self.env.clone()),
        }
    }

    fn tag_action(&self) -> Option<Arc<dyn TagAction>> {
        self.tag_action
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RunControl for MemoryRun {
    fn set_result(&self, result: BuildResult) {
        *self.result.write().unwrap_or_else(PoisonError::into_inner) = Some(result);
    }
}

impl fmt::Debug for MemoryRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRun")
            .field("build", &self.build)
            .field("result", &self.result())
            .field("env_len", &self.env.len())
            .field("has_tag_action", &self.tag_action().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::BufferListener;

    struct NoopAction;

    impl TagAction for NoopAction {
        fn label_build(
            &self,
            _: &dyn TaskListener,
            _: &str,
            _: &str,
            _: &crate::host::Workspace,
        ) -> Result<(), HostError> {
            Ok(())
        }
    }

    #[test]
    fn environment_carries_identity() {
        let run = MemoryRun::new(BuildRef::new("demo", 3), Env::single("FOO", "bar"));
        let env = run.environment(&BufferListener::new()).unwrap();

        assert_eq!(env.get(ENV_JOB_NAME), Some("demo"));
        assert_eq!(env.get(ENV_BUILD_NUMBER), Some("3"));
        assert_eq!(env.get("FOO"), Some("bar"));
    }

    #[test]
    fn explicit_env_overrides_identity() {
        let run = MemoryRun::new(BuildRef::new("demo", 3), Env::single(ENV_JOB_NAME, "other"));
        assert_eq!(run.env().get(ENV_JOB_NAME), Some("other"));
    }

    #[test]
    fn result_starts_unset() {
        let run = MemoryRun::new(BuildRef::new("demo", 1), Env::new());
        assert_eq!(run.result(), None);

        run.set_result(BuildResult::Unstable);
        assert_eq!(run.result(), Some(BuildResult::Unstable));
    }

    #[test]
    fn tag_action_slot() {
        let run = MemoryRun::new(BuildRef::new("demo", 1), Env::new());
        assert!(run.tag_action().is_none());

        run.attach_tag_action(Arc::new(NoopAction));
        assert!(run.tag_action().is_some());
    }

    #[test]
    fn environment_error_is_reported() {
        let run = MemoryRun::new(BuildRef::new("demo", 1), Env::new())
            .with_environment_error("agent offline");
        let err = run.environment(&BufferListener::new()).unwrap_err();
        assert_eq!(err.to_string(), "agent offline");
    }
}
