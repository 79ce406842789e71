// LogPane - main.rs
//
// Demo host entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (config.toml, non-fatal warnings)
// 3. Logging initialisation with the console capture layer attached
// 4. Background producer threads
// 5. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use logpane::app;
pub use logpane::core;
pub use logpane::platform;
pub use logpane::ui;
pub use logpane::util;

use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::Layer;

/// LogPane demo - an eframe window with the embeddable log console overlaid.
///
/// Background producer threads push lines into the console while the host's
/// own `tracing` output is captured into it as well.
#[derive(Parser, Debug)]
#[command(name = "LogPane", version, about)]
struct Cli {
    /// Configuration file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Number of background threads producing demo log lines.
    #[arg(short = 'p', long = "producers", default_value_t = util::constants::DEFAULT_DEMO_PRODUCERS)]
    producers: usize,

    /// Delay between lines from each producer, in milliseconds.
    #[arg(short = 'i', long = "interval-ms", default_value_t = util::constants::DEFAULT_DEMO_INTERVAL_MS)]
    interval_ms: u64,

    /// Do not forward the host's own tracing events into the console.
    #[arg(long = "no-capture")]
    no_capture: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging is up so the configured level can feed
    // the filter; its warnings are reported once the subscriber exists.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform_paths.config_file());
    let (config, config_warnings) = platform::config::load_config(&config_path);

    let console = ui::console_view::LogConsole::new(&config);
    let handle = console.handle();

    let capture = if cli.no_capture {
        None
    } else {
        let max_level = config
            .capture_level
            .parse::<LevelFilter>()
            .unwrap_or(LevelFilter::INFO);
        let layer = app::capture::ConsoleLayer::new(handle.clone()).with_max_level(max_level);
        Some(layer.boxed())
    };

    util::logging::init(cli.debug, config.log_level.as_deref(), capture);

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "LogPane demo starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
        if cli.no_capture {
            handle.log(core::model::Level::High, format!("config: {warning}"));
        }
    }

    let producers = cli.producers.min(util::constants::MAX_DEMO_PRODUCERS);
    if producers != cli.producers {
        tracing::warn!(
            requested = cli.producers,
            max = util::constants::MAX_DEMO_PRODUCERS,
            "Producer count clamped"
        );
    }
    let interval_ms = cli.interval_ms.max(util::constants::MIN_DEMO_INTERVAL_MS);
    let interval = Duration::from_millis(interval_ms);

    let stop = Arc::new(AtomicBool::new(false));
    let producer_threads = gui::spawn_producers(&handle, producers, interval, &stop);
    tracing::info!(
        producers = producer_threads.len(),
        interval_ms,
        "Demo producers started"
    );

    let export_dir = platform_paths.data_dir.clone();
    let console = console.with_custom_action(move |entries| {
        match gui::export_entries(&export_dir, entries) {
            Ok(path) => tracing::info!(
                path = %path.display(),
                entries = entries.len(),
                "Exported log history"
            ),
            Err(e) => tracing::warn!(error = %e, "Log history export failed"),
        }
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(gui::DemoApp::new(console, producer_threads, stop)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LogPane demo: {e}");
        std::process::exit(1);
    }
}
