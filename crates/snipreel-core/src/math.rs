use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::zero()
    }
}

/// A 2D transform as applied to the code container: translation then uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Translation in pixels.
    pub translate: Point2D,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Transform2D {
    /// Identity transform: no translation, scale 1.
    pub fn identity() -> Self {
        Self {
            translate: Point2D::zero(),
            scale: 1.0,
        }
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

/// One layer of a CSS-style box shadow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxShadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur_radius: f64,
    pub spread: f64,
    pub color: Color,
}

impl BoxShadow {
    /// A centered glow: no offset, no spread.
    pub fn glow(blur_radius: f64, color: Color) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            blur_radius,
            spread: 0.0,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_identity() {
        let t = Transform2D::identity();
        assert_eq!(t.translate, Point2D::zero());
        assert_eq!(t.scale, 1.0);
    }
}
