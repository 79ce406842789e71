// LogPane - core/store.rs
//
// Observable, ordered log history plus the active text filter.
//
// The store assumes single-threaded access: it is owned by the console on
// the UI thread, and other threads reach it only through queued commands
// (see app::console). Observers are notified synchronously, on the mutating
// call, after the state change has been applied.

use crate::core::filter::{self, TextFilter};
use crate::core::model::LogEntry;

// =============================================================================
// Change notification
// =============================================================================

/// What changed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// An entry was appended; `total` is the entry count afterwards.
    Appended { total: usize },

    /// All entries were removed.
    Cleared,

    /// The filter text was replaced.
    FilterChanged,
}

/// Identifies a registered observer for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

type Observer = Box<dyn FnMut(&StoreEvent)>;

// =============================================================================
// LogStore
// =============================================================================

/// Append-only log history with a derived, filtered view.
#[derive(Default)]
pub struct LogStore {
    entries: Vec<LogEntry>,
    filter: TextFilter,
    observers: Vec<(SubscriptionToken, Observer)>,
    next_token: u64,
}

impl std::fmt::Debug for LogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogStore")
            .field("entries", &self.entries.len())
            .field("filter", &self.filter)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the end of the history.
    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        let total = self.entries.len();
        self.notify(StoreEvent::Appended { total });
    }

    /// Remove every entry. The filter is left untouched.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        tracing::debug!(removed, "Log store cleared");
        self.notify(StoreEvent::Cleared);
    }

    /// Replace the filter text. `None` and `Some("")` both disable filtering.
    pub fn set_filter(&mut self, text: Option<&str>) {
        self.filter = TextFilter::new(text);
        tracing::trace!(filter = ?self.filter.text(), "Log filter changed");
        self.notify(StoreEvent::FilterChanged);
    }

    /// Active filter text, if any.
    pub fn filter_text(&self) -> Option<&str> {
        self.filter.text()
    }

    /// Every entry, in insertion order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries passing the current filter, in insertion order.
    ///
    /// Recomputed from scratch on every call.
    pub fn visible_entries(&self) -> Vec<&LogEntry> {
        filter::apply_filter(&self.entries, &self.filter)
            .into_iter()
            .filter_map(|idx| self.entries.get(idx))
            .collect()
    }

    /// Register an observer called after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token);
        self.next_token += 1;
        self.observers.push((token, Box::new(observer)));
        token
    }

    /// Remove an observer. Returns false if the token was not registered.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(t, _)| *t != token);
        self.observers.len() != before
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }
}
