// LogPane - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

// =============================================================================
// Level
// =============================================================================

/// Importance of a log entry.
///
/// Only affects display colour; filtering and ordering ignore it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    #[default]
    Middle,
    Low,
}

impl Level {
    /// Returns all variants, most important first.
    pub fn all() -> &'static [Level] {
        &[Level::High, Level::Middle, Level::Low]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Level::High => "High",
            Level::Middle => "Middle",
            Level::Low => "Low",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Log Entry
// =============================================================================

/// A single log line pushed into the console.
///
/// Entries are immutable: every field is fixed at construction and only
/// exposed through accessors. The timestamp is always the construction
/// instant; callers cannot supply one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    level: Level,
    text: String,
    timestamp: DateTime<Local>,
}

impl LogEntry {
    /// Create an entry at the default level.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_level(Level::default(), text)
    }

    /// Create an entry at an explicit level.
    pub fn with_level(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Instant at which the entry was created.
    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }
}

impl From<&str> for LogEntry {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for LogEntry {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_middle() {
        assert_eq!(LogEntry::new("hello").level(), Level::Middle);
        assert_eq!(Level::default(), Level::Middle);
    }

    #[test]
    fn test_timestamp_captured_at_construction() {
        let before = Local::now();
        let entry = LogEntry::with_level(Level::High, "boom");
        let after = Local::now();

        assert!(*entry.timestamp() >= before);
        assert!(*entry.timestamp() <= after);
        assert_eq!(entry.text(), "boom");
        assert_eq!(entry.level(), Level::High);
    }

    #[test]
    fn test_level_serialises_lowercase() {
        let json = serde_json::to_string(&Level::Low).unwrap();
        assert_eq!(json, "\"low\"");
    }
}
