use serde::{Deserialize, Serialize};

/// Size of a rectangular area, in pixels or projected units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width of the area.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Half of the width.
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Height of the area.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Half of the height.
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Returns true if either of the dimensions is zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves() {
        let size = Size::new(100.0, 50.0);
        assert_eq!(size.half_width(), 50.0);
        assert_eq!(size.half_height(), 25.0);
    }

    #[test]
    fn is_zero() {
        assert!(Size::new(0.0, 10.0).is_zero());
        assert!(Size::new(10.0, 0.0).is_zero());
        assert!(!Size::new(10.0, 10.0).is_zero());
    }
}
