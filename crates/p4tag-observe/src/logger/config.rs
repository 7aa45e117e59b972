use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::object::{LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Logger configuration, usually the `[logger]` table of the tool config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub format: LoggerFormat,
    /// Filter expression (e.g. `"info"`, `"p4tag_core=debug,info"`).
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub tz: LoggerTimeZone,
    /// Include targets (module paths) in output.
    pub with_targets: bool,
    /// Colored text output; ignored when stderr is not a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Logs are written to stderr, so color follows whether stderr is a
    /// terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}
