// LogPane - app/console.rs
//
// Thread hand-off between log producers and the UI-thread-owned store.
//
// Architecture:
//   - `Console` lives on the UI thread and owns the `LogStore` plus the
//     receiving end of an mpsc channel.
//   - `ConsoleHandle` (Clone + Send + Sync) wraps the sending end. Any thread
//     may call `send` / `clear`; the command is queued, never applied directly.
//   - The UI thread calls `Console::pump` once per frame, draining the queue
//     in FIFO order into the store (same polling pattern as a background
//     worker's progress channel).
//   - After queuing from another thread, a handle fires the repaint hook (if
//     installed) so an idle UI wakes up and pumps promptly.
//   - Commands queued on the console's own thread never call the hook: that
//     thread may be inside a UI-framework lock (a tracing event raised during
//     layout or tessellation). The wake is recorded and collected with
//     `take_deferred_wake` once the frame is done.

use crate::core::model::{Level, LogEntry};
use crate::core::store::LogStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, OnceLock};
use std::thread::ThreadId;

/// Callback that wakes the UI thread. Installed once by the UI adapter.
pub type RepaintHook = Arc<dyn Fn() + Send + Sync>;

/// Wake-up state shared by a console and all of its handles.
struct Wake {
    hook: OnceLock<RepaintHook>,
    /// Thread that owns the console (the UI thread).
    owner: ThreadId,
    deferred: AtomicBool,
}

/// A mutation queued for the UI thread.
#[derive(Debug, Clone)]
pub enum ConsoleCommand {
    Append(LogEntry),
    Clear,
}

// =============================================================================
// ConsoleHandle
// =============================================================================

/// Cloneable, thread-safe entry point for pushing logs into a console.
#[derive(Clone)]
pub struct ConsoleHandle {
    tx: mpsc::Sender<ConsoleCommand>,
    wake: Arc<Wake>,
}

impl std::fmt::Debug for ConsoleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleHandle")
            .field("repaint_hook", &self.wake.hook.get().is_some())
            .finish()
    }
}

impl ConsoleHandle {
    /// Queue an entry for the console. Callable from any thread.
    ///
    /// If the console has been dropped the entry is discarded.
    pub fn send(&self, entry: LogEntry) {
        self.submit(ConsoleCommand::Append(entry));
    }

    /// Convenience for `send(LogEntry::with_level(level, text))`.
    pub fn log(&self, level: Level, text: impl Into<String>) {
        self.send(LogEntry::with_level(level, text));
    }

    /// Queue a clear. Applied in order with any appends already queued.
    pub fn clear(&self) {
        self.submit(ConsoleCommand::Clear);
    }

    fn submit(&self, command: ConsoleCommand) {
        if self.tx.send(command).is_err() {
            tracing::trace!("Console dropped; discarding command");
            return;
        }
        if std::thread::current().id() == self.wake.owner {
            self.wake.deferred.store(true, Ordering::Release);
        } else if let Some(hook) = self.wake.hook.get() {
            hook();
        }
    }
}

// =============================================================================
// Console
// =============================================================================

/// UI-thread owner of the log store and the command queue.
pub struct Console {
    store: LogStore,
    rx: mpsc::Receiver<ConsoleCommand>,
    tx: mpsc::Sender<ConsoleCommand>,
    wake: Arc<Wake>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("store", &self.store)
            .field("repaint_hook", &self.wake.hook.get().is_some())
            .finish()
    }
}

impl Console {
    /// Create a console owned by the calling thread.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            store: LogStore::new(),
            rx,
            tx,
            wake: Arc::new(Wake {
                hook: OnceLock::new(),
                owner: std::thread::current().id(),
                deferred: AtomicBool::new(false),
            }),
        }
    }

    /// Mint a new handle. Handles may be created before or after the UI
    /// installs its repaint hook.
    pub fn handle(&self) -> ConsoleHandle {
        ConsoleHandle {
            tx: self.tx.clone(),
            wake: Arc::clone(&self.wake),
        }
    }

    /// Install the UI wake-up callback. Only the first call takes effect;
    /// returns false if a hook was already installed.
    pub fn set_repaint_hook(&self, hook: RepaintHook) -> bool {
        self.wake.hook.set(hook).is_ok()
    }

    pub fn has_repaint_hook(&self) -> bool {
        self.wake.hook.get().is_some()
    }

    /// True (once) if commands were queued from the owning thread since the
    /// last call. The caller should schedule another frame.
    pub fn take_deferred_wake(&self) -> bool {
        self.wake.deferred.swap(false, Ordering::AcqRel)
    }

    /// Apply every queued command to the store, oldest first.
    ///
    /// Returns the number of commands applied. Never blocks.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.rx.try_recv() {
            match command {
                ConsoleCommand::Append(entry) => self.store.append(entry),
                ConsoleCommand::Clear => self.store.clear(),
            }
            applied += 1;
        }
        if applied > 0 {
            tracing::trace!(applied, total = self.store.len(), "Console pumped");
        }
        applied
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// Direct store access for UI-thread controls (filter box, clear button).
    pub fn store_mut(&mut self) -> &mut LogStore {
        &mut self.store
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn texts(console: &Console) -> Vec<String> {
        console
            .store()
            .entries()
            .iter()
            .map(|e| e.text().to_string())
            .collect()
    }

    #[test]
    fn test_send_is_not_applied_until_pump() {
        let mut console = Console::new();
        let handle = console.handle();
        handle.send(LogEntry::new("queued"));

        assert!(console.store().is_empty());
        assert_eq!(console.pump(), 1);
        assert_eq!(texts(&console), vec!["queued"]);
        assert_eq!(console.pump(), 0);
    }

    #[test]
    fn test_clear_applied_in_queue_order() {
        let mut console = Console::new();
        let handle = console.handle();
        handle.send(LogEntry::new("a"));
        handle.send(LogEntry::new("b"));
        handle.clear();
        handle.log(Level::Low, "c");

        console.pump();
        assert_eq!(texts(&console), vec!["c"]);
        assert_eq!(console.store().entries()[0].level(), Level::Low);
    }

    #[test]
    fn test_per_producer_order_preserved() {
        let mut console = Console::new();
        let producers: Vec<_> = (0..4)
            .map(|p| {
                let handle = console.handle();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        handle.send(LogEntry::new(format!("{p}:{i}")));
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        assert_eq!(console.pump(), 400);
        for p in 0..4 {
            let prefix = format!("{p}:");
            let seq: Vec<usize> = console
                .store()
                .entries()
                .iter()
                .filter_map(|e| e.text().strip_prefix(prefix.as_str()))
                .map(|n| n.parse().unwrap())
                .collect();
            assert_eq!(seq, (0..100).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_repaint_hook_fires_per_send() {
        let console = Console::new();
        let handle = console.handle();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);

        assert!(console.set_repaint_hook(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })));
        assert!(!console.set_repaint_hook(Arc::new(|| {})));

        std::thread::spawn(move || {
            handle.send(LogEntry::new("one"));
            handle.clear();
        })
        .join()
        .unwrap();
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
        assert!(!console.take_deferred_wake());
    }

    #[test]
    fn test_owner_thread_send_defers_wake() {
        let mut console = Console::new();
        let handle = console.handle();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        console.set_repaint_hook(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        handle.send(LogEntry::new("from the ui thread"));
        assert_eq!(wakes.load(Ordering::SeqCst), 0);
        assert!(console.take_deferred_wake());
        assert!(!console.take_deferred_wake());

        assert_eq!(console.pump(), 1);
        assert_eq!(texts(&console), vec!["from the ui thread"]);
    }

    #[test]
    fn test_send_after_drop_is_discarded() {
        let console = Console::new();
        let handle = console.handle();
        drop(console);
        handle.send(LogEntry::new("nobody listening"));
    }
}
