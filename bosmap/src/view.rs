use bosmap_types::cartesian::{CartesianPoint2d, Point2, Rect, Size};
use bosmap_types::geo::{GeoPoint, GeoPoint2d, Projection, WebMercator};

/// Map view specifies the visible viewport of a map: the center position, the resolution
/// (projected units per pixel) and the pixel size of the area the map is displayed in.
///
/// `MapView` is an immutable value type. All modifying methods return a new instance, and the
/// view of a [`Map`](crate::Map) is replaced wholesale through
/// [`Map::set_view`](crate::Map::set_view).
#[derive(Debug, Clone, Copy)]
pub struct MapView {
    projected_position: Option<Point2>,
    resolution: f64,
    size: Size,
}

impl MapView {
    /// Creates a new view centered on the given geographic position.
    ///
    /// If the position cannot be projected into Web Mercator coordinates (the poles), the view
    /// will have no position and no tiles will be requested for it.
    pub fn new(position: &impl GeoPoint<Num = f64>, resolution: f64) -> Self {
        let projection = WebMercator::<GeoPoint2d, Point2>::default();
        Self {
            projected_position: projection.project(&GeoPoint2d::from(position)),
            resolution,
            size: Size::default(),
        }
    }

    /// Creates a new view centered on the given point in projected coordinates.
    pub fn new_projected(position: &impl CartesianPoint2d<Num = f64>, resolution: f64) -> Self {
        Self {
            projected_position: Some(Point2::new(position.x(), position.y())),
            resolution,
            size: Size::default(),
        }
    }

    /// Center position of the view in geographic coordinates, if it can be represented in
    /// them.
    pub fn position(&self) -> Option<GeoPoint2d> {
        let projection = WebMercator::<GeoPoint2d, Point2>::default();
        self.projected_position
            .and_then(|position| projection.unproject(&position))
    }

    /// Center position of the view in projected coordinates.
    pub fn projected_position(&self) -> Option<Point2> {
        self.projected_position
    }

    /// Resolution of the view, in projected units per pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns a new view with the given resolution.
    pub fn with_resolution(&self, resolution: f64) -> Self {
        Self {
            resolution,
            ..*self
        }
    }

    /// Pixel size of the area the map is rendered to.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns a new view with the given pixel size.
    pub fn with_size(&self, new_size: Size) -> Self {
        Self {
            size: new_size,
            ..*self
        }
    }

    /// Bounding rectangle of the viewport in projected coordinates.
    ///
    /// Returns `None` if the view has no position or zero size.
    pub fn get_bbox(&self) -> Option<Rect> {
        if self.size.is_zero() || !self.resolution.is_finite() {
            return None;
        }

        let position = self.projected_position?;
        let half_width = self.size.half_width() * self.resolution;
        let half_height = self.size.half_height() * self.resolution;

        Some(Rect::new(
            position.x() - half_width,
            position.y() - half_height,
            position.x() + half_width,
            position.y() + half_height,
        ))
    }

    /// Returns a new view moved by the given number of pixels on the screen.
    ///
    /// Positive `dx` moves the viewport right, positive `dy` moves it down, matching the
    /// direction of screen coordinates.
    pub fn translate_by_pixels(&self, dx: f64, dy: f64) -> Self {
        let Some(position) = self.projected_position else {
            return *self;
        };

        Self {
            projected_position: Some(
                position.translated(dx * self.resolution, -dy * self.resolution),
            ),
            ..*self
        }
    }

    /// Returns a new view with the resolution multiplied by the given factor.
    ///
    /// Factors above 1.0 zoom out, factors below 1.0 zoom in.
    pub fn zoomed(&self, factor: f64) -> Self {
        self.with_resolution(self.resolution * factor)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use bosmap_types::latlon;

    use super::*;

    #[test]
    fn position_round_trip() {
        let view = MapView::new(&latlon!(42.3598, -71.0851), 10.0);
        let position = view.position().unwrap();
        assert_abs_diff_eq!(position.lat(), 42.3598, epsilon = 1e-9);
        assert_abs_diff_eq!(position.lon(), -71.0851, epsilon = 1e-9);
    }

    #[test]
    fn pole_has_no_position() {
        let view = MapView::new(&latlon!(90.0, 0.0), 10.0);
        assert!(view.position().is_none());
        assert!(view.with_size(Size::new(100.0, 100.0)).get_bbox().is_none());
    }

    #[test]
    fn bbox_centered_on_position() {
        let view =
            MapView::new_projected(&Point2::new(100.0, -100.0), 2.0).with_size(Size::new(50.0, 100.0));
        let bbox = view.get_bbox().unwrap();
        assert_eq!(bbox, Rect::new(50.0, -200.0, 150.0, 0.0));
    }

    #[test]
    fn bbox_requires_size() {
        let view = MapView::new_projected(&Point2::new(0.0, 0.0), 1.0);
        assert!(view.get_bbox().is_none());
    }

    #[test]
    fn translate_by_pixels() {
        let view = MapView::new_projected(&Point2::new(0.0, 0.0), 2.0)
            .with_size(Size::new(100.0, 100.0));
        let moved = view.translate_by_pixels(10.0, 20.0);
        let position = moved.projected_position().unwrap();
        assert_abs_diff_eq!(position.x(), 20.0);
        assert_abs_diff_eq!(position.y(), -40.0);
    }

    #[test]
    fn zoomed() {
        let view = MapView::new_projected(&Point2::new(0.0, 0.0), 2.0);
        assert_eq!(view.zoomed(2.0).resolution(), 4.0);
        assert_eq!(view.zoomed(0.5).resolution(), 1.0);
    }
}
