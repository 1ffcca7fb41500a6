use std::marker::PhantomData;

use crate::cartesian::{CartesianPoint2d, NewCartesianPoint2d};
use crate::geo::datum::Datum;
use crate::geo::point::{GeoPoint, NewGeoPoint};

/// Conversion between two coordinate systems.
pub trait Projection {
    /// Point type the projection converts from.
    type InPoint;
    /// Point type the projection converts to.
    type OutPoint;

    /// Projects the input point. Returns `None` if the point cannot be represented in the
    /// target coordinate system.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;

    /// Reverses the projection.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}

/// Spherical Web Mercator projection (EPSG:3857), used by OSM, Mapbox and most other web tile
/// services.
#[derive(Debug, Copy, Clone)]
pub struct WebMercator<In, Out> {
    datum: Datum,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> WebMercator<In, Out> {
    /// Creates a projection based on the given datum.
    pub fn new(datum: Datum) -> Self {
        Self {
            datum,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }
}

impl<In, Out> Default for WebMercator<In, Out> {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection for WebMercator<In, Out> {
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        // tan(pi/2) is finite in f64, so the pole must be rejected explicitly
        if input.lat().abs() >= 90.0 {
            return None;
        }

        let x = self.datum.semimajor() * input.lon_rad();
        let y = self.datum.semimajor()
            * (std::f64::consts::FRAC_PI_4 + input.lat_rad() / 2.0)
                .tan()
                .ln();

        if x.is_finite() && y.is_finite() {
            Some(Self::OutPoint::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let lat = 2.0 * (input.y() / self.datum.semimajor()).exp().atan() - std::f64::consts::FRAC_PI_2;
        let lon = input.x() / self.datum.semimajor();

        if lat.is_finite() && lon.is_finite() {
            Some(Self::InPoint::latlon(lat.to_degrees(), lon.to_degrees()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::cartesian::Point2;
    use crate::geo::GeoPoint2d;
    use crate::latlon;

    fn projection() -> WebMercator<GeoPoint2d, Point2> {
        WebMercator::default()
    }

    #[test]
    fn origin_maps_to_origin() {
        let projected = projection().project(&latlon!(0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(projected.x(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(projected.y(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn known_point() {
        // 180 degrees east on the equator is the right edge of the projection plane.
        let projected = projection().project(&latlon!(0.0, 180.0)).unwrap();
        assert_abs_diff_eq!(projected.x(), 20037508.342789244, epsilon = 1e-6);
        assert_abs_diff_eq!(projected.y(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn pole_is_not_projectable() {
        assert!(projection().project(&latlon!(90.0, 0.0)).is_none());
        assert!(projection().project(&latlon!(-90.0, 0.0)).is_none());
    }

    #[test]
    fn round_trip() {
        let original = latlon!(42.3598, -71.0851);
        let projected = projection().project(&original).unwrap();
        let unprojected: GeoPoint2d = projection().unproject(&projected).unwrap();

        assert_abs_diff_eq!(unprojected.lat(), original.lat(), epsilon = 1e-9);
        assert_abs_diff_eq!(unprojected.lon(), original.lon(), epsilon = 1e-9);
    }
}
