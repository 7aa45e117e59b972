use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::host::TaskListener;

/// Listener that forwards run log lines to `tracing` at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl TaskListener for TracingListener {
    fn log(&self, line: &str) {
        info!(target: "p4tag::console", "{line}");
    }
}

/// Listener that keeps every line, in order.
///
/// Lines are mirrored to `tracing` at DEBUG level.
#[derive(Debug, Default)]
pub struct BufferListener {
    lines: Mutex<Vec<String>>,
}

impl BufferListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines logged so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whole log joined with `\n`.
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    /// Index of the first line containing `needle`.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .position(|l| l.contains(needle))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.position(needle).is_some()
    }
}

impl TaskListener for BufferListener {
    fn log(&self, line: &str) {
        debug!(target: "p4tag::console", "{line}");
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_keeps_order() {
        let l = BufferListener::new();
        l.log("first");
        l.log("second line");

        assert_eq!(l.lines(), vec!["first", "second line"]);
        assert_eq!(l.position("second"), Some(1));
        assert!(!l.contains("third"));
        assert_eq!(l.text(), "first\nsecond line");
    }
}
