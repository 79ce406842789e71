// LogPane - app/capture.rs
//
// tracing -> console bridge. `ConsoleLayer` is a tracing_subscriber layer
// that turns each tracing event into a LogEntry and sends it through a
// ConsoleHandle, so host code that already logs with `tracing` shows up in
// the on-screen console without extra calls.
//
// Level mapping: ERROR/WARN -> High, INFO -> Middle, DEBUG/TRACE -> Low.
// Events above `max_level` or under an ignored target prefix are dropped.
// The crate's own modules and the GUI stack are ignored by default.

use crate::app::console::ConsoleHandle;
use crate::core::model::{Level, LogEntry};
use crate::util::constants::{CAPTURE_GUI_STACK_TARGETS, CAPTURE_IGNORED_TARGETS};
use std::fmt::Write;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Map a tracing level onto a console level.
pub fn level_for(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::ERROR | tracing::Level::WARN => Level::High,
        tracing::Level::INFO => Level::Middle,
        tracing::Level::DEBUG | tracing::Level::TRACE => Level::Low,
    }
}

/// Forwards tracing events into a console.
#[derive(Debug, Clone)]
pub struct ConsoleLayer {
    handle: ConsoleHandle,
    max_level: LevelFilter,
    ignored_targets: Vec<String>,
}

impl ConsoleLayer {
    pub fn new(handle: ConsoleHandle) -> Self {
        Self {
            handle,
            max_level: LevelFilter::INFO,
            ignored_targets: CAPTURE_IGNORED_TARGETS
                .iter()
                .chain(CAPTURE_GUI_STACK_TARGETS)
                .map(|t| (*t).to_string())
                .collect(),
        }
    }

    /// Most verbose level to forward.
    pub fn with_max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    /// Drop events whose target starts with `prefix`.
    pub fn ignore_target(mut self, prefix: impl Into<String>) -> Self {
        self.ignored_targets.push(prefix.into());
        self
    }

    fn accepts(&self, level: &tracing::Level, target: &str) -> bool {
        if *level > self.max_level {
            return false;
        }
        !self
            .ignored_targets
            .iter()
            .any(|prefix| target.starts_with(prefix.as_str()))
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(self.max_level)
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !self.accepts(metadata.level(), metadata.target()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.handle.send(LogEntry::with_level(
            level_for(metadata.level()),
            visitor.finish(metadata.target()),
        ));
    }
}

/// Collects the `message` field and any other fields as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self, target: &str) -> String {
        let mut line = format!("{target}: {}", self.message);
        if !self.fields.is_empty() {
            line.push_str(&self.fields);
        }
        line
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }
}
