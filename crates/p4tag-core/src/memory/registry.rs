use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock},
};

use p4tag_model::BuildNumber;

use crate::{
    host::{Job, JobRegistry, Run},
    memory::MemoryRun,
};

/// Job with an in-memory build history.
#[derive(Debug)]
pub struct MemoryJob {
    name: String,
    builds: RwLock<BTreeMap<BuildNumber, Arc<MemoryRun>>>,
}

impl MemoryJob {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            builds: RwLock::new(BTreeMap::new()),
        }
    }

    /// Record a run under its build number, replacing an earlier one.
    pub fn add_build(&self, run: Arc<MemoryRun>) {
        let number = run.build_ref().number;
        self.builds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(number, run);
    }
}

impl Job for MemoryJob {
    fn full_name(&self) -> &str {
        &self.name
    }

    fn build_by_number(&self, number: BuildNumber) -> Option<Arc<dyn Run>> {
        let builds = self.builds.read().unwrap_or_else(PoisonError::into_inner);
        builds.get(&number).map(|r| Arc::clone(r) as Arc<dyn Run>)
    }
}

/// Registry of [`MemoryJob`]s keyed by full name.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    jobs: RwLock<BTreeMap<String, Arc<MemoryJob>>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the job called `name`, creating it when missing.
    pub fn job(&self, name: &str) -> Arc<MemoryJob> {
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            jobs.entry(name.to_string())
                .or_insert_with(|| Arc::new(MemoryJob::new(name))),
        )
    }

    /// Record `run` in the history of its job and return the shared handle.
    pub fn add_run(&self, run: MemoryRun) -> Arc<MemoryRun> {
        let run = Arc::new(run);
        self.job(&run.build_ref().job).add_build(Arc::clone(&run));
        run
    }

    pub fn job_names(&self) -> Vec<String> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl JobRegistry for MemoryRegistry {
    fn item_by_full_name(&self, name: &str) -> Option<Arc<dyn Job>> {
        let jobs = self.jobs.read().unwrap_or_else(PoisonError::into_inner);
        jobs.get(name).map(|j| Arc::clone(j) as Arc<dyn Job>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use p4tag_model::{BuildRef, Env};

    #[test]
    fn add_run_creates_job() {
        let registry = MemoryRegistry::new();
        registry.add_run(MemoryRun::new(BuildRef::new("folder/demo", 4), Env::new()));

        let job = registry.item_by_full_name("folder/demo").expect("job");
        assert_eq!(job.full_name(), "folder/demo");
        assert!(job.build_by_number(4).is_some());
        assert!(job.build_by_number(5).is_none());
        assert!(registry.item_by_full_name("demo").is_none());
    }

    #[test]
    fn runs_of_one_job_share_it() {
        let registry = MemoryRegistry::new();
        registry.add_run(MemoryRun::new(BuildRef::new("demo", 2), Env::new()));
        registry.add_run(MemoryRun::new(BuildRef::new("demo", 10), Env::new()));

        let job = registry.item_by_full_name("demo").expect("job");
        assert_eq!(job.build_by_number(10).expect("build").build_ref().number, 10);
        assert_eq!(registry.job_names(), vec!["demo".to_string()]);
    }
}
