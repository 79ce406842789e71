// LogPane - app/mod.rs
//
// Application layer: UI-thread ownership of the store, cross-thread command
// queue, tracing capture.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod capture;
pub mod console;
