// LogPane - lib.rs
//
// Library entry point. Everything a host application needs to embed the
// console lives here; the demo host in `main.rs`/`gui.rs` is not part of the
// library surface.
//
// Typical embedding:
//
//     let (config, _warnings) = logpane::platform::config::load_config(&path);
//     let mut console = logpane::ui::console_view::LogConsole::new(&config);
//     let handle = console.handle();              // Clone + Send, any thread
//     handle.log(logpane::core::model::Level::High, "disk full");
//     // inside eframe::App::update:
//     console.show(ctx);

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
