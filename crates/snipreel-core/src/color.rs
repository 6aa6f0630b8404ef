use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color representation with f32 components in [0.0, 1.0] range.
///
/// Serializes to and from CSS color strings (`#RRGGBB`, `rgba(r, g, b, a)`),
/// the form the external renderer and the HTTP API both speak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new RGBA color.
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 1.0).
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    pub fn from_hex_u32(rgb: u32) -> Self {
        Self::from_rgb8(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "#FF0000FF").
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(ColorError::InvalidHex);
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::InvalidHex)
        };
        match hex.len() {
            6 => Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => {
                let base = Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?);
                Ok(base.with_alpha(channel(6..8)? as f32 / 255.0))
            }
            _ => Err(ColorError::InvalidHex),
        }
    }

    /// Parse a CSS color: `#RRGGBB`, `#RRGGBBAA`, `rgb(...)`, `rgba(...)` or `transparent`.
    pub fn parse(css: &str) -> Result<Self, ColorError> {
        let css = css.trim();
        if css.eq_ignore_ascii_case("transparent") {
            return Ok(Color::TRANSPARENT);
        }
        if css.starts_with('#') {
            return Self::from_hex(css);
        }

        let (body, expects_alpha) = if let Some(rest) = css.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = css.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(ColorError::Unsupported(css.to_string()));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ColorError::Unsupported(css.to_string()))?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if expects_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ColorError::Unsupported(css.to_string()));
        }

        let channel = |s: &str| -> Result<f32, ColorError> {
            let v: f32 = s
                .parse()
                .map_err(|_| ColorError::Unsupported(css.to_string()))?;
            if !(0.0..=255.0).contains(&v) {
                return Err(ColorError::OutOfRange(css.to_string()));
            }
            Ok(v / 255.0)
        };
        let alpha = if expects_alpha {
            let a: f32 = parts[3]
                .parse()
                .map_err(|_| ColorError::Unsupported(css.to_string()))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(ColorError::OutOfRange(css.to_string()));
            }
            a
        } else {
            1.0
        };

        Ok(Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }

    /// Same color with a different alpha, clamped to [0, 1].
    pub fn with_alpha(&self, a: f32) -> Color {
        Color {
            a: a.clamp(0.0, 1.0),
            ..*self
        }
    }

    /// Convert to RGBA u8 tuple.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.a * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// CSS representation: `#RRGGBB` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        if self.a >= 1.0 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            let a = (self.a * 1000.0).round() / 1000.0;
            format!("rgba({}, {}, {}, {})", r, g, b, a)
        }
    }

    // --- Named constants ---

    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color string")]
    InvalidHex,
    #[error("unsupported color syntax: {0}")]
    Unsupported(String),
    #[error("color component out of range: {0}")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex_rgb() {
        let c = Color::from_hex("#FF8800").unwrap();
        assert_eq!(c.to_rgba8(), [255, 136, 0, 255]);
    }

    #[test]
    fn test_color_from_hex_rgba() {
        let c = Color::from_hex("#FF880080").unwrap();
        assert_eq!(c.to_rgba8(), [255, 136, 0, 128]);
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert!(Color::from_hex("invalid").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
    }

    #[test]
    fn test_color_from_hex_u32() {
        assert_eq!(Color::from_hex_u32(0xB87333).to_rgba8(), [184, 115, 51, 255]);
    }

    #[test]
    fn test_parse_rgba() {
        let c = Color::parse("rgba(184, 115, 51, 0.3)").unwrap();
        assert_eq!(c.to_rgba8()[..3], [184, 115, 51]);
        assert!((c.a - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::parse("hsl(10, 20%, 30%)").is_err());
        assert!(Color::parse("rgba(1, 2, 3)").is_err());
        assert!(Color::parse("rgba(1, 2, 3, 4)").is_err());
    }

    #[test]
    fn test_css_round_trip_through_serde() {
        let c = Color::parse("rgba(184, 115, 51, 0.3)").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"rgba(184, 115, 51, 0.3)\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_rgba8(), c.to_rgba8());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(format!("{}", Color::from_hex_u32(0xFF0000)), "#FF0000");
        assert_eq!(
            format!("{}", Color::from_hex_u32(0xFF0000).with_alpha(0.5)),
            "rgba(255, 0, 0, 0.5)"
        );
    }
}
