/// Parameters of the reference ellipsoid that tie geographic coordinates to lengths on the
/// projection plane.
///
/// All supported tile services use [`Datum::WGS84`]; other datums can be constructed for
/// custom projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// The WGS84 ellipsoid, the datum of GPS coordinates and of all web map services.
    pub const WGS84: Self = Self::new(6_378_137.0, 298.257223563);

    /// Creates a datum from the semimajor axis (in meters) and the inverse flattening of the
    /// ellipsoid.
    pub const fn new(semimajor: f64, inv_flattening: f64) -> Self {
        Self {
            semimajor,
            inv_flattening,
        }
    }

    /// Semimajor axis of the ellipsoid, in meters.
    ///
    /// This is the only ellipsoid parameter the spherical Web Mercator projection uses.
    pub const fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Inverse flattening of the ellipsoid.
    pub const fn inv_flattening(&self) -> f64 {
        self.inv_flattening
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}
