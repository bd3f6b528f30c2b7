use ratatui::style::{Color, Modifier, Style};

use crate::store::ColorScheme;

/// Colours for one colour scheme. Automatic leaves the terminal's own colours alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub selected: Color,
}

impl Palette {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Automatic => Self {
                fg: Color::Reset,
                bg: Color::Reset,
                accent: Color::Yellow,
                muted: Color::Gray,
                selected: Color::LightRed,
            },
            ColorScheme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::DarkGray,
                selected: Color::Red,
            },
            ColorScheme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Yellow,
                muted: Color::Gray,
                selected: Color::LightRed,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

/// `#rrggbb` to an RGB colour; anything else is white.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Color::White;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

/// Cycled colours for file kinds in the unit view.
pub fn kind_color(slot: usize) -> Color {
    const KINDS: [Color; 8] = [
        Color::Cyan,
        Color::Green,
        Color::Magenta,
        Color::Yellow,
        Color::Blue,
        Color::Red,
        Color::LightCyan,
        Color::LightGreen,
    ];
    KINDS[slot % KINDS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_hexes() {
        assert_eq!(hex_color("#4e79a7"), Color::Rgb(0x4e, 0x79, 0xa7));
        assert_eq!(hex_color("nope"), Color::White);
        assert_eq!(hex_color("#zzzzzz"), Color::White);
    }
}
