// LogPane - core/filter.rs
//
// Text filter for log entries: case-sensitive substring match.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::LogEntry;

/// Active text filter. `None` and the empty string both mean "no filtering".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFilter {
    needle: Option<String>,
}

impl TextFilter {
    /// Build a filter, normalising the empty string to "no filter".
    pub fn new(text: Option<&str>) -> Self {
        Self {
            needle: text.filter(|t| !t.is_empty()).map(str::to_owned),
        }
    }

    /// Returns true if no filtering is applied.
    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    /// The active filter text, if any.
    pub fn text(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    /// Check a single entry against the filter.
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match &self.needle {
            Some(needle) => entry.text().contains(needle.as_str()),
            None => true,
        }
    }
}

/// Apply the filter to a slice of entries, returning indices of matching entries.
///
/// Indices are ascending, so the result always describes an order-preserving
/// subsequence of `entries`.
pub fn apply_filter(entries: &[LogEntry], filter: &TextFilter) -> Vec<usize> {
    if filter.is_empty() {
        return (0..entries.len()).collect();
    }

    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| filter.matches(entry))
        .map(|(idx, _)| idx)
        .collect()
}
