//! Color palettes for the display, keypad, and status bar.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Border/frame color
    pub border: Color,
    /// Panel titles
    pub title: Color,
    /// Dimmer border for less important areas
    pub dim: Color,
    /// Display digits
    pub display: Color,
    /// Display text while it reads "Error"
    pub error: Color,
    pub digit_key: Color,
    pub operator_key: Color,
    pub action_key: Color,
    pub status: Color,
}

/// Default coral/red theme.
pub const PALETTE_CORAL: Palette = Palette {
    border: Color::Rgb(255, 90, 90),
    title: Color::Rgb(255, 110, 110),
    dim: Color::Rgb(130, 70, 70),
    display: Color::Rgb(210, 205, 200),
    error: Color::Rgb(255, 80, 80),
    digit_key: Color::Rgb(210, 205, 200),
    operator_key: Color::Rgb(255, 220, 100),
    action_key: Color::Rgb(255, 110, 110),
    status: Color::Rgb(160, 150, 150),
};

/// ANSI 16-color fallback for older terminals.
pub const PALETTE_ANSI: Palette = Palette {
    border: Color::Red,
    title: Color::LightRed,
    dim: Color::DarkGray,
    display: Color::White,
    error: Color::LightRed,
    digit_key: Color::White,
    operator_key: Color::Yellow,
    action_key: Color::LightRed,
    status: Color::Gray,
};

/// No colors - plain text.
pub const PALETTE_NONE: Palette = Palette {
    border: Color::Reset,
    title: Color::Reset,
    dim: Color::Reset,
    display: Color::Reset,
    error: Color::Reset,
    digit_key: Color::Reset,
    operator_key: Color::Reset,
    action_key: Color::Reset,
    status: Color::Reset,
};

impl Palette {
    pub fn for_theme(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Coral => PALETTE_CORAL,
            ThemeName::Ansi => PALETTE_ANSI,
            ThemeName::None => PALETTE_NONE,
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_match_theme_names() {
        assert_eq!(Palette::for_theme(ThemeName::Coral), PALETTE_CORAL);
        assert_eq!(Palette::for_theme(ThemeName::Ansi), PALETTE_ANSI);
        assert_eq!(Palette::for_theme(ThemeName::None).border, Color::Reset);
    }
}
