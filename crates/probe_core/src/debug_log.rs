use std::collections::VecDeque;

use chrono::{DateTime, SecondsFormat, Utc};
use probe_logging::probe_debug;

pub const DEBUG_LOG_CAPACITY: usize = 50;

/// Bounded diagnostic trail, newest line first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DebugLog {
    lines: VecDeque<String>,
}

impl DebugLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps and prepends a line, evicting the oldest past capacity.
    pub fn push(&mut self, at: DateTime<Utc>, text: &str) {
        probe_debug!("[DEBUG] {}", text);
        let stamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.lines.push_front(format!("{stamp}  {text}"));
        self.lines.truncate(DEBUG_LOG_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Panel text: entries separated by a blank line.
    pub fn render(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n\n")
    }
}
