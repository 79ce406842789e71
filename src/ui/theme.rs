// LogPane - ui/theme.rs
//
// Colour scheme and level colour mapping, resolved from config into egui
// colours once at construction.
// No dependencies on app state or business logic.

use crate::core::model::Level;
use crate::platform::config::{ConsoleConfig, Rgba};
use egui::Color32;

/// Convert a config colour to an egui colour.
pub fn colour(rgba: Rgba) -> Color32 {
    let [r, g, b, a] = rgba;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Resolved colours for the console panel and its toast.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub text: Color32,
    pub background: Color32,
    pub border: Color32,
    pub border_width: f32,
    pub toast_text: Color32,
    pub toast_background: Color32,
    high: Option<Color32>,
    middle: Option<Color32>,
    low: Option<Color32>,
}

impl Theme {
    pub fn from_config(config: &ConsoleConfig) -> Self {
        let look = &config.appearance;
        Self {
            text: colour(look.text_colour),
            background: colour(look.background_colour),
            border: colour(look.border_colour),
            border_width: look.border_width,
            toast_text: colour(config.toast.text_colour),
            toast_background: colour(config.toast.background_colour),
            high: look.level_colours.high.map(colour),
            middle: look.level_colours.middle.map(colour),
            low: look.level_colours.low.map(colour),
        }
    }

    /// Text colour for an entry of the given level.
    ///
    /// Levels without a configured override use the panel text colour.
    pub fn level_colour(&self, level: Level) -> Color32 {
        match level {
            Level::High => self.high.unwrap_or(self.text),
            Level::Middle => self.middle.unwrap_or(self.text),
            Level::Low => self.low.unwrap_or(self.text),
        }
    }

    pub fn border_stroke(&self) -> egui::Stroke {
        egui::Stroke::new(self.border_width, self.border)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ConsoleConfig::default())
    }
}

/// Layout constants.
pub const ROW_FONT_SIZE: f32 = 12.0;
pub const DATE_COLUMN_SPACING: f32 = 6.0;
pub const PANEL_MARGIN: f32 = 8.0;
pub const CONTROL_ICON_SIZE: f32 = 16.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_levels_use_text_colour() {
        let theme = Theme::default();
        for level in Level::all() {
            assert_eq!(theme.level_colour(*level), Color32::from_rgb(0, 255, 0));
        }
    }

    #[test]
    fn test_level_override_applies_to_that_level_only() {
        let mut config = ConsoleConfig::default();
        config.appearance.level_colours.high = Some([255, 0, 0, 255]);
        let theme = Theme::from_config(&config);

        assert_eq!(theme.level_colour(Level::High), Color32::from_rgb(255, 0, 0));
        assert_eq!(theme.level_colour(Level::Middle), theme.text);
        assert_eq!(theme.level_colour(Level::Low), theme.text);
    }
}
