//! Well-known environment keys read or written by the tagging step.
//!
//! Hosts publish these into a run's environment; keeping them here avoids
//! scattering magic strings across the resolver, the agent and the tests.

/// Full name of the job being promoted.
///
/// Set by the host only when the current run is a promotion of an earlier run.
pub const ENV_PROMOTED_JOB_NAME: &str = "PROMOTED_JOB_NAME";

/// Build number (decimal) of the run being promoted.
pub const ENV_PROMOTED_NUMBER: &str = "PROMOTED_NUMBER";

/// Full name of the job that owns the current run.
pub const ENV_JOB_NAME: &str = "JOB_NAME";

/// Build number of the current run.
pub const ENV_BUILD_NUMBER: &str = "BUILD_NUMBER";

/// Changelist the workspace was synced to.
///
/// Its presence marks a run whose sync step recorded tagging metadata.
pub const ENV_P4_CHANGELIST: &str = "P4_CHANGELIST";
