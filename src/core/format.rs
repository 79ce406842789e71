// LogPane - core/format.rs
//
// Plain-text rendering of entries for the clipboard.
//
// `DateFormat` validates its strftime pattern once at construction so that
// rendering a timestamp afterwards can never fail.

use crate::core::model::LogEntry;
use crate::util::constants::{DEFAULT_DATE_FORMAT, MAX_DATE_FORMAT_LEN};
use crate::util::error::FormatError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write;

/// A validated chrono strftime pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    /// Validate a strftime pattern.
    pub fn parse(pattern: &str) -> Result<Self, FormatError> {
        if pattern.len() > MAX_DATE_FORMAT_LEN {
            return Err(FormatError::DateFormatTooLong {
                length: pattern.len(),
                max_length: MAX_DATE_FORMAT_LEN,
            });
        }
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(FormatError::InvalidDateFormat {
                pattern: pattern.to_string(),
            });
        }
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render a timestamp with this pattern.
    pub fn render(&self, timestamp: &DateTime<Local>) -> String {
        timestamp.format(&self.pattern).to_string()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl std::str::FromStr for DateFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Single-entry rendering used for "copy selected": `> [<date>] <text>`.
pub fn formatted(entry: &LogEntry, date_format: &DateFormat) -> String {
    format!(
        "> [{}] {}",
        date_format.render(entry.timestamp()),
        entry.text()
    )
}

/// Every entry as `<date> <text>`, newline separated, in store order.
///
/// Used for "copy all". An empty slice yields the empty string.
pub fn all_entries_formatted(entries: &[LogEntry], date_format: &DateFormat) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "{} {}",
            date_format.render(entry.timestamp()),
            entry.text()
        );
    }
    out
}
