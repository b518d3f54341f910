// SPDX-License-Identifier: MPL-2.0
//! SVG color syntax.
//!
//! Only the forms OpenMoji and hand-written test assets actually use are
//! understood: hex notation, `rgb()` and the basic keyword colors. Anything
//! else (gradients via `url(#...)`, `currentColor`, system colors) resolves
//! to `None` and the corresponding pass is not drawn.

/// An opaque RGB888 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// The CSS level 1 keyword colors plus a few common extras.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::new(0, 0, 0)),
    ("silver", Color::new(192, 192, 192)),
    ("gray", Color::new(128, 128, 128)),
    ("grey", Color::new(128, 128, 128)),
    ("white", Color::new(255, 255, 255)),
    ("maroon", Color::new(128, 0, 0)),
    ("red", Color::new(255, 0, 0)),
    ("purple", Color::new(128, 0, 128)),
    ("fuchsia", Color::new(255, 0, 255)),
    ("magenta", Color::new(255, 0, 255)),
    ("green", Color::new(0, 128, 0)),
    ("lime", Color::new(0, 255, 0)),
    ("olive", Color::new(128, 128, 0)),
    ("yellow", Color::new(255, 255, 0)),
    ("navy", Color::new(0, 0, 128)),
    ("blue", Color::new(0, 0, 255)),
    ("teal", Color::new(0, 128, 128)),
    ("aqua", Color::new(0, 255, 255)),
    ("cyan", Color::new(0, 255, 255)),
    ("orange", Color::new(255, 165, 0)),
    ("brown", Color::new(165, 42, 42)),
    ("pink", Color::new(255, 192, 203)),
    ("gold", Color::new(255, 215, 0)),
];

/// Parses an SVG color value. Returns `None` for `none` and for anything
/// unrecognized.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = value.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_function(args);
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, color)| *color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        // #rgb / #rgba: each digit is doubled
        3 | 4 => {
            let expand = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Some(Color::new(expand(0)?, expand(1)?, expand(2)?))
        }
        // #rrggbb / #rrggbbaa: alpha is ignored
        6 | 8 => Some(Color::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let component = |s: &str| -> Option<u8> {
        let value = if let Some(percent) = s.strip_suffix('%') {
            percent.parse::<f32>().ok()? * 2.55
        } else {
            s.parse::<f32>().ok()?
        };
        Some(value.round().clamp(0.0, 255.0) as u8)
    };
    Some(Color::new(
        component(parts[0])?,
        component(parts[1])?,
        component(parts[2])?,
    ))
}
