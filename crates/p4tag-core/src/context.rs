use std::{fmt, sync::Arc};

use crate::{
    host::JobRegistry,
    memory::MemoryRegistry,
    metrics::{MetricsHandle, noop_metrics},
};

/// Host dependencies injected into build steps.
///
/// Replaces ambient global lookups: the job registry used to follow
/// promotions and the metrics backend are passed in explicitly.
#[derive(Clone)]
pub struct HostContext {
    registry: Arc<dyn JobRegistry>,
    metrics: MetricsHandle,
}

impl HostContext {
    pub fn new(registry: Arc<dyn JobRegistry>, metrics: MetricsHandle) -> Self {
        Self { registry, metrics }
    }

    pub fn registry(&self) -> &Arc<dyn JobRegistry> {
        &self.registry
    }

    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    /// Replace the registry and return updated context.
    pub fn with_registry(mut self, registry: Arc<dyn JobRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the metrics backend and return updated context.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }
}

impl Default for HostContext {
    /// Empty registry, no-op metrics.
    fn default() -> Self {
        Self {
            registry: Arc::new(MemoryRegistry::new()),
            metrics: noop_metrics(),
        }
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostContext")
            .field("registry", &"<handle>")
            .field("metrics", &"<handle>")
            .finish()
    }
}
