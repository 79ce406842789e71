// LogPane - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogPane";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogPane";

/// Current crate version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the optional configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Level names accepted by `[logging] level` and `[capture] max_level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Default most-verbose level forwarded by the tracing capture layer.
pub const DEFAULT_CAPTURE_LEVEL: &str = "info";

/// Target prefixes the capture layer never forwards. These are the modules
/// that run while the console applies commands, so forwarding them would
/// feed the console's own diagnostics back into itself.
pub const CAPTURE_IGNORED_TARGETS: &[&str] = &["logpane::app", "logpane::core", "logpane::ui"];

/// GUI-stack target prefixes the capture layer never forwards. These crates
/// log while egui holds its context lock (font atlas overflow, tessellation),
/// and their events arrive through the `log` bridge.
pub const CAPTURE_GUI_STACK_TARGETS: &[&str] =
    &["egui", "epaint", "eframe", "winit", "wgpu", "glow", "glutin"];

// =============================================================================
// Formatting
// =============================================================================

/// Default chrono strftime pattern for entry timestamps.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Maximum accepted length of a date format pattern.
pub const MAX_DATE_FORMAT_LEN: usize = 128;

// =============================================================================
// Appearance defaults (egui points)
// =============================================================================

/// Title shown on the folded badge.
pub const DEFAULT_FOLDED_TITLE: &str = "Show Logs";

/// Title shown above the expanded panel.
pub const DEFAULT_EXPANDED_TITLE: &str = "Logs";

/// Maximum length of a configured title.
pub const MAX_TITLE_LEN: usize = 64;

pub const DEFAULT_TEXT_COLOUR: [u8; 4] = [0, 255, 0, 255];
pub const DEFAULT_BACKGROUND_COLOUR: [u8; 4] = [0, 0, 0, 255];
pub const DEFAULT_BORDER_COLOUR: [u8; 4] = [0, 0, 0, 255];

pub const DEFAULT_BORDER_WIDTH: f32 = 2.0;
pub const MAX_BORDER_WIDTH: f32 = 16.0;

pub const DEFAULT_TITLE_AREA_HEIGHT: f32 = 30.0;
pub const DEFAULT_FOLDED_WIDTH: f32 = 90.0;
pub const DEFAULT_EXPANDED_WIDTH: f32 = 420.0;
pub const DEFAULT_TOP_CONTROL_AREA_HEIGHT: f32 = 32.0;
pub const DEFAULT_LOG_AREA_HEIGHT: f32 = 240.0;
pub const DEFAULT_BOTTOM_CONTROL_AREA_HEIGHT: f32 = 32.0;

/// Lower bound for any configured width or height.
pub const MIN_DIMENSION: f32 = 10.0;

/// Upper bound for any configured width or height.
pub const MAX_DIMENSION: f32 = 4096.0;

// =============================================================================
// Toast
// =============================================================================

pub const DEFAULT_TOAST_TEXT_COLOUR: [u8; 4] = [0, 0, 0, 255];
pub const DEFAULT_TOAST_BACKGROUND_COLOUR: [u8; 4] = [255, 255, 255, 178];
pub const DEFAULT_TOAST_PADDING: f32 = 5.0;
pub const DEFAULT_TOAST_DISTANCE_FROM_TOP: f32 = 10.0;
pub const MAX_TOAST_OFFSET: f32 = 200.0;

/// Seconds a toast stays on screen.
pub const DEFAULT_TOAST_DISMISS_SECS: u64 = 2;
pub const MAX_TOAST_DISMISS_SECS: u64 = 60;

/// Toast shown after the custom action runs, unless configured.
pub const DEFAULT_CUSTOM_ACTION_TEXT: &str = "Something Happens";

pub const TOAST_COPIED_ALL: &str = "Copied all logs";
pub const TOAST_COPIED_SELECTED: &str = "Copied selected log";

// =============================================================================
// Scrolling
// =============================================================================

/// Distance from the bottom (points) still treated as "at the bottom" when
/// deciding whether to follow newly appended entries.
pub const FOLLOW_TOLERANCE: f32 = 4.0;

// =============================================================================
// Demo host
// =============================================================================

pub const DEFAULT_DEMO_PRODUCERS: usize = 2;
pub const MAX_DEMO_PRODUCERS: usize = 16;
pub const DEFAULT_DEMO_INTERVAL_MS: u64 = 750;
pub const MIN_DEMO_INTERVAL_MS: u64 = 10;

/// File name prefix for JSON exports written by the demo's custom action.
pub const EXPORT_FILE_PREFIX: &str = "logpane-export";
