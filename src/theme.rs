// Theme support for the TUI
//
// Two built-in palettes selected by the `theme` config key. Unknown names
// fall back to "dark".

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // UI element colors
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub status_bar: Color,

    // Terminal colors
    pub background: Color,
    pub foreground: Color,

    // Selection
    pub selection: Color,
    pub selection_fg: Color,

    /// Placeholders, hints, read-only cells
    pub muted: Color,

    // Notices
    pub success: Color,
    pub error: Color,

    /// Cells with pending edits
    pub edited: Color,

    pub border_type: BorderType,
}

impl Theme {
    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "Unknown theme, using dark");
                Self::dark()
            }
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            title: Color::Cyan,
            border: Color::Rgb(0x58, 0x5b, 0x70),
            highlight: Color::Yellow,
            status_bar: Color::Green,
            background: Color::Rgb(0x1e, 0x1e, 0x2e),
            foreground: Color::Rgb(0xcd, 0xd6, 0xf4),
            selection: Color::Rgb(0x45, 0x47, 0x5a),
            selection_fg: Color::White,
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            success: Color::Green,
            error: Color::Red,
            edited: Color::Rgb(0xfa, 0xb3, 0x87),
            border_type: BorderType::Rounded,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            title: Color::Blue,
            border: Color::Rgb(0xac, 0xb0, 0xbe),
            highlight: Color::Rgb(0xdf, 0x8e, 0x1d),
            status_bar: Color::Rgb(0x40, 0xa0, 0x2b),
            background: Color::Rgb(0xef, 0xf1, 0xf5),
            foreground: Color::Rgb(0x4c, 0x4f, 0x69),
            selection: Color::Rgb(0xcc, 0xd0, 0xda),
            selection_fg: Color::Black,
            muted: Color::Rgb(0x8c, 0x8f, 0xa1),
            success: Color::Rgb(0x40, 0xa0, 0x2b),
            error: Color::Rgb(0xd2, 0x0f, 0x39),
            edited: Color::Rgb(0xfe, 0x64, 0x0b),
            border_type: BorderType::Plain,
        }
    }

    /// Swatch color for a `#rrggbb` value
    pub fn swatch(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        assert_eq!(Theme::by_name("LIGHT").name, "light");
        assert_eq!(Theme::by_name("solarized").name, "dark");
    }

    #[test]
    fn swatch_parses_hex() {
        assert_eq!(Theme::swatch("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(Theme::swatch("ff8000"), None);
        assert_eq!(Theme::swatch("#zz0000"), None);
    }
}
