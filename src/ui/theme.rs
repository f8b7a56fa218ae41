use crate::reading::FatigueLevel;
use ratatui::style::Color;

/// Midnight palette
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub focus: Color,
    pub dimmed: Color,
    pub surface: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::midnight()
    }
}

impl Theme {
    pub fn midnight() -> Self {
        Self {
            background: Color::Rgb(26, 27, 38), // #1A1B26
            text: Color::Rgb(169, 177, 214),    // #A9B1D6
            focus: Color::Rgb(247, 118, 142),   // #F7768E
            dimmed: Color::Rgb(100, 110, 150),  // #646E96
            surface: Color::Rgb(36, 40, 59),    // #24283B
            warning: Color::Rgb(224, 175, 104), // #E0AF68
        }
    }

    /// Status-line colour for a fatigue bucket.
    pub fn fatigue(&self, level: FatigueLevel) -> Color {
        match level {
            FatigueLevel::Fresh | FatigueLevel::Mild => self.dimmed,
            FatigueLevel::Moderate => self.warning,
            FatigueLevel::High => self.focus,
        }
    }
}
