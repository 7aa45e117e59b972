//! In-process host: runs, jobs and log sinks kept in memory.
//!
//! Drives the tagging step without a CI server; used by the agent binary
//! and by tests.
mod listener;
pub use listener::{BufferListener, TracingListener};

mod registry;
pub use registry::{MemoryJob, MemoryRegistry};

mod run;
pub use run::MemoryRun;
