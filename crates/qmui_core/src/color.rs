//! RGBA color type

use std::fmt;
use thiserror::Error;

/// Errors produced when parsing a hex color string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string had no digits after the optional `#`
    #[error("empty color string")]
    Empty,

    /// Digit count was not 3, 6 or 8
    #[error("invalid hex color length {0} in {1:?} (expected 3, 6 or 8 digits)")]
    InvalidLength(usize, String),

    /// A character outside `[0-9a-fA-F]`
    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

/// RGBA color with channels in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional)
    pub fn parse_hex(input: &str) -> Result<Self, ColorParseError> {
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        if digits.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(input.to_string()));
        }

        let channel = |s: &str| -> f32 {
            // Digits are validated above, so this cannot fail
            u8::from_str_radix(s, 16).unwrap_or(0) as f32 / 255.0
        };

        match digits.len() {
            3 => {
                let expand = |i: usize| {
                    let d = &digits[i..i + 1];
                    channel(&format!("{d}{d}"))
                };
                Ok(Self::rgb(expand(0), expand(1), expand(2)))
            }
            6 => Ok(Self::rgb(
                channel(&digits[0..2]),
                channel(&digits[2..4]),
                channel(&digits[4..6]),
            )),
            8 => Ok(Self::rgba(
                channel(&digits[0..2]),
                channel(&digits[2..4]),
                channel(&digits[4..6]),
                channel(&digits[6..8]),
            )),
            len => Err(ColorParseError::InvalidLength(len, input.to_string())),
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a < 1.0 {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.r),
                byte(self.g),
                byte(self.b),
                byte(self.a)
            )
        } else {
            format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
        }
    }

    /// Per-channel linear interpolation: `from + (to - from) * t`
    ///
    /// `t` is not clamped, so overshooting easings carry through.
    pub fn lerp(from: &Color, to: &Color, t: f32) -> Color {
        Color {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!(Color::parse_hex("#FF8000").unwrap(), Color::from_hex(0xFF8000));
        assert_eq!(Color::parse_hex("ff8000").unwrap(), Color::from_hex(0xFF8000));
        assert_eq!(Color::parse_hex("#F80").unwrap(), Color::from_hex(0xFF8800));

        let translucent = Color::parse_hex("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(Color::parse_hex("#"), Err(ColorParseError::Empty));
        assert!(matches!(
            Color::parse_hex("#12345"),
            Err(ColorParseError::InvalidLength(5, _))
        ));
        assert!(matches!(
            Color::parse_hex("#GG0000"),
            Err(ColorParseError::InvalidDigit(_))
        ));
        assert!(matches!(
            Color::parse_hex("+12345"),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Color::from_hex(0x1E66F5).to_hex(), "#1e66f5");
        assert_eq!(Color::WHITE.with_alpha(0.0).to_hex(), "#ffffff00");
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Color::lerp(&Color::BLACK, &Color::WHITE, 0.5);
        assert_eq!(mid, Color::rgb(0.5, 0.5, 0.5));
    }
}
