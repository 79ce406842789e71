// LogPane - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (console), core (read-only models), platform config
// values, egui.

pub mod console_view;
pub mod follow;
pub mod theme;
pub mod toast;
