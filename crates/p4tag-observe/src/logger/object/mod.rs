mod format;
pub use format::LoggerFormat;

mod level;
pub use level::LoggerLevel;

mod timezone;
pub use timezone::LoggerTimeZone;

mod timer;
pub use timer::Rfc3339Timer;
