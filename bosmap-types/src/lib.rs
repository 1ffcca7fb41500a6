//! Geographic and cartesian primitives used by the `bosmap` map engine.
//!
//! The crate is split into two coordinate worlds:
//!
//! * [`geo`] - points on the surface of the Earth, given as latitude and longitude in degrees,
//!   and projections that convert them into
//! * [`cartesian`] - plain planar coordinates, in which map views, tile schemas and bounding
//!   rectangles are expressed.
//!
//! The only projection shipped here is [`geo::WebMercator`], since all supported tile services
//! use the standard web map projection (EPSG:3857).

pub mod cartesian;
pub mod geo;
