use std::str::FromStr;

use ratatui::style::Color;

/// Swatches offered by the color popup, in display order. The token is what
/// gets stored on the note.
pub const SWATCHES: [(&str, Color); 10] = [
    ("white", Color::Rgb(0xFF, 0xFF, 0xFF)),
    ("red", Color::Rgb(0xF2, 0x8B, 0x82)),
    ("orange", Color::Rgb(0xFB, 0xBC, 0x04)),
    ("yellow", Color::Rgb(0xFF, 0xF4, 0x75)),
    ("green", Color::Rgb(0xCC, 0xFF, 0x90)),
    ("teal", Color::Rgb(0xA7, 0xFF, 0xEB)),
    ("blue", Color::Rgb(0xCB, 0xF0, 0xF8)),
    ("darkblue", Color::Rgb(0xAE, 0xCB, 0xFA)),
    ("purple", Color::Rgb(0xD7, 0xAE, 0xFB)),
    ("pink", Color::Rgb(0xFD, 0xCF, 0xE8)),
];

pub const INK: Color = Color::Rgb(0x20, 0x21, 0x24);

pub fn swatch_token(index: usize) -> Option<&'static str> {
    SWATCHES.get(index).map(|(token, _)| *token)
}

/// Background for a stored color token. Tokens outside the palette are read
/// as ratatui color names or `#rrggbb`; anything else falls back to white.
pub fn background(token: &str) -> Color {
    SWATCHES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|(_, color)| *color)
        .or_else(|| Color::from_str(token).ok())
        .unwrap_or(SWATCHES[0].1)
}
