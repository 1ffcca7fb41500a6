use serde::{Deserialize, Serialize};

use super::{CartesianPoint2d, Point2};

/// Axis-aligned rectangle in projected map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Left boundary.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Right boundary.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Bottom boundary.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Top boundary.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Returns true if the given point lies inside the rectangle or on its boundary.
    pub fn contains(&self, point: &impl CartesianPoint2d<Num = f64>) -> bool {
        self.x_min <= point.x()
            && self.x_max >= point.x()
            && self.y_min <= point.y()
            && self.y_max >= point.y()
    }

    /// Returns true if the rectangles have at least one common point.
    pub fn intersects(&self, other: Rect) -> bool {
        self.x_min <= other.x_max
            && self.x_max >= other.x_min
            && self.y_min <= other.y_max
            && self.y_max >= other.y_min
    }

    /// Returns a rectangle with the same center, scaled by the given factor.
    pub fn magnify(&self, factor: f64) -> Self {
        let center = self.center();
        let half_width = self.width() / 2.0 * factor;
        let half_height = self.height() / 2.0 * factor;
        Self {
            x_min: center.x() - half_width,
            y_min: center.y() - half_height,
            x_max: center.x() + half_width,
            y_max: center.y() + half_height,
        }
    }

    /// Limits the rectangle to the boundaries of `other`.
    pub fn limit(&self, other: Rect) -> Self {
        Self {
            x_min: self.x_min.max(other.x_min),
            y_min: self.y_min.max(other.y_min),
            x_max: self.x_max.min(other.x_max),
            y_max: self.y_max.min(other.y_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(&Point2::new(5.0, 5.0)));
        assert!(rect.contains(&Point2::new(0.0, 10.0)));
        assert!(!rect.contains(&Point2::new(-0.1, 5.0)));
    }

    #[test]
    fn intersects() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.intersects(Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(rect.intersects(Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!rect.intersects(Rect::new(10.1, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn magnify_keeps_center() {
        let rect = Rect::new(0.0, 0.0, 10.0, 20.0);
        let magnified = rect.magnify(2.0);
        assert_eq!(magnified.center(), rect.center());
        assert_eq!(magnified.width(), 20.0);
        assert_eq!(magnified.height(), 40.0);
    }

    #[test]
    fn limit() {
        let rect = Rect::new(-10.0, -10.0, 10.0, 10.0);
        let limited = rect.limit(Rect::new(0.0, -20.0, 20.0, 5.0));
        assert_eq!(limited, Rect::new(0.0, -10.0, 10.0, 5.0));
    }
}
