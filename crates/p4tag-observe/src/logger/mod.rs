mod config;
mod error;
mod install;
mod object;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use object::{LoggerFormat, LoggerLevel, LoggerTimeZone, Rfc3339Timer};

/// Install the global tracing subscriber described by `cfg`.
///
/// Can succeed only once per process; later calls return
/// [`LoggerError::AlreadyInitialized`].
///
/// With [`LoggerTimeZone::Local`] the offset is detected here, so call this
/// before spawning threads.
///
/// ```rust
/// use p4tag_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// init_logger(&config).expect("logger");
/// tracing::info!("logger initialized");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => install::text(cfg),
        LoggerFormat::Json => install::json(cfg),
        LoggerFormat::Journald => install::journald(cfg),
    }
}
