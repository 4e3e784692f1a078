//! Theme → terminal palette mapping.
//!
//! The persisted theme is a two-valued preference; this module is the one
//! place that turns it into concrete colors. Everything the TUI draws pulls
//! its colors from a [`Palette`], so flipping the theme restyles the whole
//! surface, code highlighting included.

use ratatui::style::Color;

use crate::core::settings::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Whole-frame background. `Reset` keeps the terminal's own color.
    pub bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub user: Color,
    pub bot: Color,
    pub error: Color,
    pub accent: Color,
    /// Syntect theme used for fenced code blocks.
    pub code_theme: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                bg: Color::White,
                fg: Color::Black,
                dim: Color::Gray,
                user: Color::Blue,
                bot: Color::Green,
                error: Color::Red,
                accent: Color::Magenta,
                code_theme: "InspiredGitHub",
            },
            Theme::Dark => Palette {
                bg: Color::Reset,
                fg: Color::Gray,
                dim: Color::DarkGray,
                user: Color::Cyan,
                bot: Color::Green,
                error: Color::Red,
                accent: Color::Yellow,
                code_theme: "base16-ocean.dark",
            },
        }
    }
}
