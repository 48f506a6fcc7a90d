//! CSS Box Model types.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

use serde::Serialize;

/// A rectangle positioned in 2D space.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// A rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle spanning two corners, normalised so width and height are
    /// never negative.
    #[must_use]
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True if any part of the rectangle lies in the vertical band
    /// `[top, top + height]`.
    #[must_use]
    pub fn intersects_band(&self, top: f32, height: f32) -> bool {
        self.bottom() >= top && self.y <= top + height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalises() {
        let r = Rect::from_corners(10.0, 40.0, 4.0, 20.0);
        assert_eq!(r, Rect::new(4.0, 20.0, 6.0, 20.0));
        assert_eq!(r.right(), 10.0);
        assert_eq!(r.bottom(), 40.0);
    }

    #[test]
    fn test_intersects_band() {
        let r = Rect::new(0.0, 100.0, 10.0, 20.0);
        assert!(r.intersects_band(90.0, 20.0));
        assert!(r.intersects_band(110.0, 5.0));
        assert!(!r.intersects_band(0.0, 50.0));
        assert!(!r.intersects_band(121.0, 50.0));
    }
}
