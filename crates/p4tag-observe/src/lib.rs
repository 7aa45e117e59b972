//! Process-wide logging for the p4tag tools.
//!
//! Everything in the workspace logs through `tracing`; this crate owns the
//! subscriber side: filter, output format and timestamps.
mod logger;
pub use logger::*;
