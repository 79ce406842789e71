// LogPane - core/mod.rs
//
// Core business logic layer: entry model, filter, store, text formatting.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod filter;
pub mod format;
pub mod model;
pub mod store;
