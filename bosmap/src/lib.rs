//! Bosmap is a headless map engine: it owns the map view (center position, resolution, pixel
//! size), the set of layers attached to the map, and the logic that turns the visible viewport
//! into tile requests against a remote basemap service. What it deliberately does not do is put
//! pixels on a screen - presentation is left to the embedding application, which observes the
//! map through a [`Messenger`] and reads loaded tiles from the layers.
//!
//! # Quick start
//!
//! ```no_run
//! use bosmap::layer::raster_tile_layer::RasterTileLayerBuilder;
//! use bosmap::MapBuilder;
//!
//! # tokio_test::block_on(async {
//! let layer = RasterTileLayerBuilder::new_mapbox("shimolu523.p1g0bd7h", "pk.ey...")
//!     .build()
//!     .expect("invalid layer configuration");
//!
//! let map = MapBuilder::default()
//!     .with_latlon(42.3598, -71.0851)
//!     .with_z_level(13)
//!     .with_layer(layer)
//!     .build();
//!
//! map.load_layers();
//! # });
//! ```
//!
//! This creates a map centered on Boston with a Mapbox basemap layer and starts loading the
//! tiles covering the viewport. Until `load_layers` is called, no network activity happens:
//! building a map and its layers is pure construction.
//!
//! # Main components
//!
//! * [`Map`] - the explicit handle for an initialized map. Holds the current [`MapView`] and a
//!   [`LayerCollection`], plus an optional application dataset passed in by the host.
//! * [`layer`] - layers know where their data comes from and how to fetch it. The only layer
//!   type here is the raster tile layer, which requests prerendered tiles over HTTP.
//! * [`TileSchema`] - arithmetic that converts a view into the set of tile indices to request.

pub(crate) mod async_runtime;
pub mod decoded_image;
pub mod error;
pub mod layer;
mod map;
mod messenger;
pub mod tile_schema;
mod view;

pub use map::{LayerCollection, Map, MapBuilder};
pub use messenger::{DummyMessenger, Messenger};
pub use tile_schema::{Lod, TileSchema};
pub use view::MapView;

// Reexport bosmap_types
pub use bosmap_types;
