use serde::{Deserialize, Serialize};

/// Page or box dimensions in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// ISO A4 rounded to whole points.
    pub const A4: Size = Size { width: 595.0, height: 842.0 };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// True when both dimensions are finite and strictly positive.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A position in template page coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawable_size() {
        assert!(Size::A4.is_drawable());
        assert!(!Size::zero().is_drawable());
        assert!(!Size::new(-1.0, 10.0).is_drawable());
        assert!(!Size::new(f32::INFINITY, 10.0).is_drawable());
        assert!(!Size::new(10.0, f32::NAN).is_drawable());
    }
}
