//! Colours per theme.

use ratatui::style::Color;
use switchboard_types::Theme;

use crate::state::LogTone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub selection: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl ThemeColors {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                border: Color::Gray,
                selection: Color::Magenta,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
            },
            Theme::Light => Self {
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                border: Color::DarkGray,
                selection: Color::LightBlue,
                success: Color::Green,
                warning: Color::Rgb(180, 120, 0),
                error: Color::Red,
            },
        }
    }

    pub fn tone(&self, tone: LogTone) -> Color {
        match tone {
            LogTone::Muted => self.muted,
            LogTone::Info => self.text,
            LogTone::Success => self.success,
            LogTone::Warning => self.warning,
            LogTone::Error => self.error,
        }
    }
}
