use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Point on the surface of a celestial body, given in geographic coordinates.
pub trait GeoPoint {
    /// Numeric type used to represent coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;

    /// Longitude in degrees.
    fn lon(&self) -> Self::Num;

    /// Latitude in radians.
    fn lat_rad(&self) -> Self::Num {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> Self::Num {
        self.lon().to_radians()
    }
}

/// A geographic point type that can be constructed from a coordinate pair.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a point with the given latitude and longitude (in degrees).
    fn latlon(lat: N, lon: N) -> Self;
}

/// 2d point on the surface of the Earth.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint for GeoPoint2d {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint<f64> for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl GeoPoint2d {
    /// Creates a new point from another.
    pub fn from(other: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            lat: other.lat(),
            lon: other.lon(),
        }
    }
}

/// Creates a new [`GeoPoint2d`] from latitude and longitude values (in degrees).
///
/// ```
/// use bosmap_types::geo::GeoPoint;
/// use bosmap_types::latlon;
///
/// let point = latlon!(42.3598, -71.0851);
/// assert_eq!(point.lat(), 42.3598);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        <$crate::geo::GeoPoint2d as $crate::geo::NewGeoPoint<f64>>::latlon($lat, $lon)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latlon_macro() {
        let point = latlon!(42.28, -71.11);
        assert_eq!(point.lat(), 42.28);
        assert_eq!(point.lon(), -71.11);
    }

    #[test]
    fn radians() {
        let point = latlon!(90.0, -180.0);
        assert_eq!(point.lat_rad(), std::f64::consts::FRAC_PI_2);
        assert_eq!(point.lon_rad(), -std::f64::consts::PI);
    }
}
