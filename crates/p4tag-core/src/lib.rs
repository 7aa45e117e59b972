pub mod context;
pub mod error;
pub mod expand;
pub mod host;
pub mod memory;
pub mod metrics;
pub mod pipeline;
pub mod step;

pub use context::HostContext;
pub use error::{AbortError, HostError, LabelError, StepError};
pub use expand::Expand;
pub use host::{Job, JobRegistry, Launcher, Run, RunControl, TagAction, TaskListener, Workspace};
pub use metrics::{MetricsBackend, MetricsHandle, NoOpMetrics, StepOutcome, noop_metrics};
pub use pipeline::Pipeline;
pub use step::{BuildStep, LabelOutcome, MetadataSource, TagStep};
