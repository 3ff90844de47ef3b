//! Theme and Styling
//!
//! Colors and styles for the upload and gallery panels.

use ratatui::style::{Color, Modifier, Style};

/// Application theme
pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Rgb(0, 212, 255);
    pub const OK: Color = Color::Rgb(34, 197, 94);
    pub const BUSY: Color = Color::Rgb(251, 191, 36);
    pub const FAIL: Color = Color::Rgb(239, 68, 68);
    /// Hashtags and the gauge fill, the blue of a web link
    pub const LINK: Color = Color::Rgb(59, 130, 246);

    pub const FG: Color = Color::Rgb(229, 229, 229);
    pub const FG_MUTED: Color = Color::Rgb(161, 161, 161);
    pub const FG_FAINT: Color = Color::Rgb(82, 82, 82);
    pub const TRACK: Color = Color::Rgb(26, 26, 26);
    pub const FRAME: Color = Color::Rgb(51, 51, 51);

    fn fg(color: Color) -> Style {
        Style::default().fg(color)
    }

    fn bold(color: Color) -> Style {
        Self::fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Self::fg(Self::FG)
    }

    pub fn text_secondary() -> Style {
        Self::fg(Self::FG_MUTED)
    }

    pub fn text_dim() -> Style {
        Self::fg(Self::FG_FAINT)
    }

    pub fn title() -> Style {
        Self::bold(Self::ACCENT)
    }

    pub fn heading() -> Style {
        Self::bold(Self::FG)
    }

    pub fn success() -> Style {
        Self::fg(Self::OK)
    }

    pub fn error() -> Style {
        Self::fg(Self::FAIL)
    }

    pub fn border() -> Style {
        Self::fg(Self::FRAME)
    }

    pub fn border_focused() -> Style {
        Self::fg(Self::LINK)
    }

    /// Selected gallery item
    pub fn selected() -> Style {
        Self::bold(Self::ACCENT)
    }

    pub fn hashtag() -> Style {
        Self::fg(Self::LINK).add_modifier(Modifier::UNDERLINED)
    }

    pub fn shortcut_key() -> Style {
        Self::bold(Self::ACCENT)
    }

    pub fn shortcut_desc() -> Style {
        Self::fg(Self::FG_MUTED)
    }

    /// Stage currently running
    pub fn active() -> Style {
        Self::bold(Self::BUSY)
    }

    pub fn complete() -> Style {
        Self::fg(Self::OK)
    }

    pub fn pending() -> Style {
        Self::fg(Self::FG_FAINT)
    }

    pub fn gauge() -> Style {
        Style::default().fg(Self::LINK).bg(Self::TRACK)
    }
}

/// Stage and list markers
pub struct Icons;

impl Icons {
    pub const COMPLETE: &'static str = "✓";
    pub const ACTIVE: &'static str = "●";
    pub const PENDING: &'static str = "○";
    pub const ERROR: &'static str = "✗";
    pub const ARROW: &'static str = "→";
    pub const SELECTED: &'static str = "▶";
    pub const DOT: &'static str = "•";
}
