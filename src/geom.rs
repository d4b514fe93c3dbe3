//! Geometric primitives used by the chart pipeline.
//!
//! All coordinates are logical pixels relative to the chart's top-left
//! corner unless a type says otherwise.

/// A point in screen space (logical pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X value in pixels.
    pub x: f32,
    /// Y value in pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Multiply both coordinates by a uniform factor.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// A rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub const fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ScreenPoint::new(x, y), ScreenPoint::new(x + width, y + height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Scale both corners by a uniform factor.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.min.scaled(factor), self.max.scaled(factor))
    }

    /// Move the rectangle by an offset.
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self::new(
            ScreenPoint::new(self.min.x + dx, self.min.y + dy),
            ScreenPoint::new(self.max.x + dx, self.max.y + dy),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_rect_is_invalid() {
        let rect = ScreenRect::from_origin_size(10.0, 10.0, 0.0, 5.0);
        assert!(!rect.is_valid());
    }

    #[test]
    fn scaled_rect_keeps_proportions() {
        let rect = ScreenRect::from_origin_size(1.0, 2.0, 3.0, 4.0).scaled(2.0);
        assert_eq!(rect.min, ScreenPoint::new(2.0, 4.0));
        assert_eq!(rect.width(), 6.0);
        assert_eq!(rect.height(), 8.0);
    }
}
