//! ARGB colors and their `#AARRGGBB` text form

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit ARGB color.
///
/// `Color::default()` is all zeros, which is what a part carries when its document
/// has no material element at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("transparent", Color::TRANSPARENT),
    ("black", Color::from_argb(0xFF, 0x00, 0x00, 0x00)),
    ("white", Color::from_argb(0xFF, 0xFF, 0xFF, 0xFF)),
    ("red", Color::from_argb(0xFF, 0xFF, 0x00, 0x00)),
    ("green", Color::from_argb(0xFF, 0x00, 0x80, 0x00)),
    ("blue", Color::from_argb(0xFF, 0x00, 0x00, 0xFF)),
    ("gray", Color::from_argb(0xFF, 0x80, 0x80, 0x80)),
    ("yellow", Color::from_argb(0xFF, 0xFF, 0xFF, 0x00)),
];

impl Color {
    /// Fallback for material elements whose color cannot be read
    pub const TRANSPARENT: Color = Color::from_argb(0x00, 0xFF, 0xFF, 0xFF);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque color
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    /// Parse `#RGB`, `#ARGB`, `#RRGGBB`, `#AARRGGBB` or a known color name
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return Self::parse_hex(hex)
                .ok_or_else(|| Error::InvalidData(format!("Invalid color value: {}", text)));
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(text))
            .map(|(_, color)| *color)
            .ok_or_else(|| Error::InvalidData(format!("Unknown color name: {}", text)))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::from_rgb(digit(0)?, digit(1)?, digit(2)?)),
            4 => Some(Self::from_argb(digit(0)?, digit(1)?, digit(2)?, digit(3)?)),
            6 => Some(Self::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::from_argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
