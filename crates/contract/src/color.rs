//! Branding color resolution

use pdf_core::Color;

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Navy used whenever no valid branding color is given
pub const DEFAULT_COLOR: Rgb = Rgb {
    r: 30,
    g: 51,
    b: 105,
};

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::from_rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Parse a `#rrggbb` / `rrggbb` color, falling back to [`DEFAULT_COLOR`]
///
/// Malformed input is never an error.
///
/// # Examples
/// ```
/// use contract::{resolve_color, Rgb, DEFAULT_COLOR};
/// assert_eq!(resolve_color(Some("#ff0000")), Rgb { r: 255, g: 0, b: 0 });
/// assert_eq!(resolve_color(Some("#GGGGGG")), DEFAULT_COLOR);
/// assert_eq!(resolve_color(None), DEFAULT_COLOR);
/// ```
pub fn resolve_color(hex: Option<&str>) -> Rgb {
    hex.and_then(parse_hex).unwrap_or(DEFAULT_COLOR)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    // from_str_radix alone would accept a leading '+'
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}
