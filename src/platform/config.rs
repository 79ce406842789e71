// LogPane - platform/config.rs
//
// Platform-specific data directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.
//
// Every value is validated against named constants. Invalid values never
// abort start-up: they produce an actionable warning and fall back to the
// default, so a broken config can only make the console look plainer.

use crate::core::format::DateFormat;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogPane configuration and data.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logpane/ or %APPDATA%\LogPane\config\)
    pub config_dir: PathBuf,

    /// Data directory for exports.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// Raw config.toml shape
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[appearance]` section.
    pub appearance: AppearanceSection,
    /// `[toast]` section.
    pub toast: ToastSection,
    /// `[capture]` section.
    pub capture: CaptureSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[appearance]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AppearanceSection {
    pub text_colour: Option<String>,
    pub background_colour: Option<String>,
    pub border_colour: Option<String>,
    pub border_width: Option<f32>,
    pub title_area_height: Option<f32>,
    pub folded_width: Option<f32>,
    pub expanded_width: Option<f32>,
    pub folded_title: Option<String>,
    pub expanded_title: Option<String>,
    pub top_control_area_height: Option<f32>,
    pub log_area_height: Option<f32>,
    pub bottom_control_area_height: Option<f32>,
    /// chrono strftime pattern, e.g. "%H:%M:%S%.3f".
    pub date_format: Option<String>,
    /// `[appearance.level_colours]` per-level text colour overrides.
    pub level_colours: LevelColoursSection,
}

/// `[appearance.level_colours]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LevelColoursSection {
    pub high: Option<String>,
    pub middle: Option<String>,
    pub low: Option<String>,
}

/// `[toast]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ToastSection {
    pub text_colour: Option<String>,
    pub background_colour: Option<String>,
    pub padding: Option<f32>,
    pub distance_from_top: Option<f32>,
    pub dismiss_secs: Option<u64>,
    /// Toast shown after the custom action button runs.
    pub custom_action_text: Option<String>,
}

/// `[capture]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CaptureSection {
    /// Most verbose tracing level forwarded into the console.
    pub max_level: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

// =============================================================================
// Validated configuration
// =============================================================================

/// RGBA colour, unmultiplied.
pub type Rgba = [u8; 4];

/// Optional per-level text colour overrides. `None` means "use the text colour".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelColours {
    pub high: Option<Rgba>,
    pub middle: Option<Rgba>,
    pub low: Option<Rgba>,
}

/// Display options for the console panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub text_colour: Rgba,
    pub background_colour: Rgba,
    pub border_colour: Rgba,
    pub border_width: f32,
    pub title_area_height: f32,
    pub folded_width: f32,
    pub expanded_width: f32,
    pub folded_title: String,
    pub expanded_title: String,
    pub top_control_area_height: f32,
    pub log_area_height: f32,
    pub bottom_control_area_height: f32,
    pub date_format: DateFormat,
    pub level_colours: LevelColours,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            text_colour: constants::DEFAULT_TEXT_COLOUR,
            background_colour: constants::DEFAULT_BACKGROUND_COLOUR,
            border_colour: constants::DEFAULT_BORDER_COLOUR,
            border_width: constants::DEFAULT_BORDER_WIDTH,
            title_area_height: constants::DEFAULT_TITLE_AREA_HEIGHT,
            folded_width: constants::DEFAULT_FOLDED_WIDTH,
            expanded_width: constants::DEFAULT_EXPANDED_WIDTH,
            folded_title: constants::DEFAULT_FOLDED_TITLE.to_string(),
            expanded_title: constants::DEFAULT_EXPANDED_TITLE.to_string(),
            top_control_area_height: constants::DEFAULT_TOP_CONTROL_AREA_HEIGHT,
            log_area_height: constants::DEFAULT_LOG_AREA_HEIGHT,
            bottom_control_area_height: constants::DEFAULT_BOTTOM_CONTROL_AREA_HEIGHT,
            date_format: DateFormat::default(),
            level_colours: LevelColours::default(),
        }
    }
}

/// Transient notification options.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastConfig {
    pub text_colour: Rgba,
    pub background_colour: Rgba,
    pub padding: f32,
    pub distance_from_top: f32,
    pub dismiss_secs: u64,
    pub custom_action_text: String,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            text_colour: constants::DEFAULT_TOAST_TEXT_COLOUR,
            background_colour: constants::DEFAULT_TOAST_BACKGROUND_COLOUR,
            padding: constants::DEFAULT_TOAST_PADDING,
            distance_from_top: constants::DEFAULT_TOAST_DISTANCE_FROM_TOP,
            dismiss_secs: constants::DEFAULT_TOAST_DISMISS_SECS,
            custom_action_text: constants::DEFAULT_CUSTOM_ACTION_TEXT.to_string(),
        }
    }
}

/// Validated configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub appearance: Appearance,
    pub toast: ToastConfig,
    /// Most verbose level forwarded by the capture layer.
    pub capture_level: String,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            appearance: Appearance::default(),
            toast: ToastConfig::default(),
            capture_level: constants::DEFAULT_CAPTURE_LEVEL.to_string(),
            log_level: None,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load and validate a config file.
///
/// Returns the validated config and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_path: &Path) -> (ConsoleConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (ConsoleConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            tracing::warn!(error = %err, "Could not read config file");
            return (
                ConsoleConfig::default(),
                vec![format!("{err}. Using defaults.")],
            );
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            tracing::warn!(error = %err, "Could not parse config file");
            return (
                ConsoleConfig::default(),
                vec![format!("{err}. Using defaults.")],
            );
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let (config, warnings) = validate(raw);
    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }
    (config, warnings)
}

/// Validate a parsed config, accumulating a warning per rejected value.
pub fn validate(raw: RawConfig) -> (ConsoleConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut config = ConsoleConfig::default();

    // -- Appearance --
    let section = raw.appearance;
    let look = &mut config.appearance;

    colour_field(
        "[appearance] text_colour",
        section.text_colour,
        &mut look.text_colour,
        &mut warnings,
    );
    colour_field(
        "[appearance] background_colour",
        section.background_colour,
        &mut look.background_colour,
        &mut warnings,
    );
    colour_field(
        "[appearance] border_colour",
        section.border_colour,
        &mut look.border_colour,
        &mut warnings,
    );

    ranged_f32(
        "[appearance] border_width",
        section.border_width,
        0.0,
        constants::MAX_BORDER_WIDTH,
        &mut look.border_width,
        &mut warnings,
    );
    for (field, value, target) in [
        (
            "[appearance] title_area_height",
            section.title_area_height,
            &mut look.title_area_height,
        ),
        (
            "[appearance] folded_width",
            section.folded_width,
            &mut look.folded_width,
        ),
        (
            "[appearance] expanded_width",
            section.expanded_width,
            &mut look.expanded_width,
        ),
        (
            "[appearance] top_control_area_height",
            section.top_control_area_height,
            &mut look.top_control_area_height,
        ),
        (
            "[appearance] log_area_height",
            section.log_area_height,
            &mut look.log_area_height,
        ),
        (
            "[appearance] bottom_control_area_height",
            section.bottom_control_area_height,
            &mut look.bottom_control_area_height,
        ),
    ] {
        ranged_f32(
            field,
            value,
            constants::MIN_DIMENSION,
            constants::MAX_DIMENSION,
            target,
            &mut warnings,
        );
    }

    title_field(
        "[appearance] folded_title",
        section.folded_title,
        &mut look.folded_title,
        &mut warnings,
    );
    title_field(
        "[appearance] expanded_title",
        section.expanded_title,
        &mut look.expanded_title,
        &mut warnings,
    );

    if let Some(pattern) = section.date_format {
        match DateFormat::parse(&pattern) {
            Ok(fmt) => look.date_format = fmt,
            Err(e) => warnings.push(format!(
                "[appearance] date_format: {e}. Using default (\"{}\").",
                constants::DEFAULT_DATE_FORMAT
            )),
        }
    }

    let levels = section.level_colours;
    for (field, value, target) in [
        (
            "[appearance.level_colours] high",
            levels.high,
            &mut look.level_colours.high,
        ),
        (
            "[appearance.level_colours] middle",
            levels.middle,
            &mut look.level_colours.middle,
        ),
        (
            "[appearance.level_colours] low",
            levels.low,
            &mut look.level_colours.low,
        ),
    ] {
        if let Some(value) = value {
            match parse_hex_colour(&value) {
                Some(rgba) => *target = Some(rgba),
                None => warnings.push(colour_warning(field, &value)),
            }
        }
    }

    // -- Toast --
    let section = raw.toast;
    let toast = &mut config.toast;

    colour_field(
        "[toast] text_colour",
        section.text_colour,
        &mut toast.text_colour,
        &mut warnings,
    );
    colour_field(
        "[toast] background_colour",
        section.background_colour,
        &mut toast.background_colour,
        &mut warnings,
    );
    ranged_f32(
        "[toast] padding",
        section.padding,
        0.0,
        constants::MAX_TOAST_OFFSET,
        &mut toast.padding,
        &mut warnings,
    );
    ranged_f32(
        "[toast] distance_from_top",
        section.distance_from_top,
        0.0,
        constants::MAX_TOAST_OFFSET,
        &mut toast.distance_from_top,
        &mut warnings,
    );
    if let Some(secs) = section.dismiss_secs {
        if (1..=constants::MAX_TOAST_DISMISS_SECS).contains(&secs) {
            toast.dismiss_secs = secs;
        } else {
            warnings.push(format!(
                "[toast] dismiss_secs = {secs} is out of range (1-{}). Using default ({}).",
                constants::MAX_TOAST_DISMISS_SECS,
                constants::DEFAULT_TOAST_DISMISS_SECS,
            ));
        }
    }
    title_field(
        "[toast] custom_action_text",
        section.custom_action_text,
        &mut toast.custom_action_text,
        &mut warnings,
    );

    // -- Capture: max_level --
    if let Some(level) = raw.capture.max_level {
        match normalise_level(&level) {
            Some(level) => config.capture_level = level,
            None => warnings.push(format!(
                "[capture] max_level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_CAPTURE_LEVEL,
            )),
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        match normalise_level(&level) {
            Some(level) => config.log_level = Some(level),
            None => warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            )),
        }
    }

    (config, warnings)
}

/// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
pub fn parse_hex_colour(value: &str) -> Option<Rgba> {
    let hex = value.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { byte(6)? } else { 255 };
    Some([byte(0)?, byte(2)?, byte(4)?, alpha])
}

fn normalise_level(level: &str) -> Option<String> {
    let lower = level.to_lowercase();
    if constants::VALID_LOG_LEVELS.contains(&lower.as_str()) {
        Some(lower)
    } else {
        None
    }
}

fn colour_warning(field: &str, value: &str) -> String {
    let err = ConfigError::InvalidColour {
        field: field.to_string(),
        value: value.to_string(),
    };
    format!("{err}. Using default.")
}

fn colour_field(field: &str, value: Option<String>, target: &mut Rgba, warnings: &mut Vec<String>) {
    if let Some(value) = value {
        match parse_hex_colour(&value) {
            Some(rgba) => *target = rgba,
            None => warnings.push(colour_warning(field, &value)),
        }
    }
}

fn ranged_f32(
    field: &str,
    value: Option<f32>,
    min: f32,
    max: f32,
    target: &mut f32,
    warnings: &mut Vec<String>,
) {
    if let Some(value) = value {
        if (min..=max).contains(&value) {
            *target = value;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: field.to_string(),
                value: value.to_string(),
                expected: format!("{min}-{max}"),
            };
            warnings.push(format!("{err}. Using default ({target})."));
        }
    }
}

fn title_field(field: &str, value: Option<String>, target: &mut String, warnings: &mut Vec<String>) {
    if let Some(value) = value {
        let len = value.chars().count();
        if len <= constants::MAX_TITLE_LEN {
            *target = value;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: field.to_string(),
                value: format!("<{len} chars>"),
                expected: format!("at most {} chars", constants::MAX_TITLE_LEN),
            };
            warnings.push(format!("{err}. Using default (\"{target}\")."));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("nope.toml"));
        assert!(warnings.is_empty());
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_valid_values_applied() {
        let (_dir, path) = write_config(
            r##"
            [appearance]
            text_colour = "#FFCC00"
            border_width = 1.5
            expanded_width = 500.0
            folded_title = "Logs?"
            date_format = "%H:%M:%S%.3f"

            [appearance.level_colours]
            high = "#ff000080"

            [toast]
            dismiss_secs = 5
            custom_action_text = "Exported"

            [capture]
            max_level = "WARN"

            [logging]
            level = "debug"

            [unknown_section]
            ignored = true
            "##,
        );

        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

        let look = &config.appearance;
        assert_eq!(look.text_colour, [255, 204, 0, 255]);
        assert_eq!(look.border_width, 1.5);
        assert_eq!(look.expanded_width, 500.0);
        assert_eq!(look.folded_title, "Logs?");
        assert_eq!(look.date_format.pattern(), "%H:%M:%S%.3f");
        assert_eq!(look.level_colours.high, Some([255, 0, 0, 128]));
        assert_eq!(look.level_colours.low, None);
        assert_eq!(config.toast.dismiss_secs, 5);
        assert_eq!(config.toast.custom_action_text, "Exported");
        assert_eq!(config.capture_level, "warn");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let (_dir, path) = write_config(
            r#"
            [appearance]
            text_colour = "green"
            log_area_height = 0.5
            date_format = "%Q"

            [toast]
            dismiss_secs = 0

            [logging]
            level = "verbose"
            "#,
        );

        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 5, "warnings: {warnings:?}");
        assert_eq!(config.appearance.text_colour, constants::DEFAULT_TEXT_COLOUR);
        assert_eq!(
            config.appearance.log_area_height,
            constants::DEFAULT_LOG_AREA_HEIGHT
        );
        assert_eq!(config.appearance.date_format, DateFormat::default());
        assert_eq!(config.toast.dismiss_secs, constants::DEFAULT_TOAST_DISMISS_SECS);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_unparseable_file_gives_defaults_with_warning() {
        let (_dir, path) = write_config("this is = = not toml");
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Using defaults"));
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_parse_hex_colour() {
        assert_eq!(parse_hex_colour("#000000"), Some([0, 0, 0, 255]));
        assert_eq!(parse_hex_colour("ffffffb2"), Some([255, 255, 255, 178]));
        assert_eq!(parse_hex_colour("#12345"), None);
        assert_eq!(parse_hex_colour("#gg0000"), None);
        assert_eq!(parse_hex_colour("#ééé"), None);
    }

    #[test]
    fn test_overlong_title_rejected() {
        let raw = RawConfig {
            appearance: AppearanceSection {
                expanded_title: Some("x".repeat(constants::MAX_TITLE_LEN + 1)),
                ..Default::default()
            },
            ..Default::default()
        };
        let (config, warnings) = validate(raw);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            config.appearance.expanded_title,
            constants::DEFAULT_EXPANDED_TITLE
        );
    }
}
