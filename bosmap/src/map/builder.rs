use bosmap_types::cartesian::{CartesianPoint2d, Point2};
use bosmap_types::geo::{GeoPoint, GeoPoint2d};
use bosmap_types::latlon;
use serde_json::Value;

use super::Map;
use crate::layer::Layer;
use crate::{MapView, Messenger};

// z-level 4 on the standard web tile schema
const DEFAULT_RESOLUTION: f64 = 156543.03392800014 / 16.0;

/// Convenience type to initialize a [`Map`].
///
/// ```no_run
/// use bosmap::layer::raster_tile_layer::RasterTileLayerBuilder;
/// use bosmap::MapBuilder;
///
/// # let tile_layer = RasterTileLayerBuilder::new_rest(|_| unimplemented!()).build().unwrap();
/// let map = MapBuilder::default()
///     .with_latlon(42.3598, -71.0851)
///     .with_z_level(13)
///     .with_layer(tile_layer)
///     .build();
/// ```
#[derive(Default)]
pub struct MapBuilder {
    position: Option<GeoPoint2d>,
    projected_position: Option<Point2>,
    resolution: Option<f64>,
    z_level: Option<u32>,
    layers: Vec<Box<dyn Layer>>,
    messenger: Option<Box<dyn Messenger>>,
    dataset: Option<Value>,
}

impl MapBuilder {
    /// Sets the center point of the map to the given geographical point.
    ///
    /// If the given point cannot be projected into Web Mercator coordinates, the map will have
    /// no position and no tiles will be loaded for it.
    ///
    /// Replaces the value set by the [`MapBuilder::with_projected_position()`] and
    /// [`MapBuilder::with_latlon()`] methods.
    ///
    /// Defaults to `[0, 0]`.
    pub fn with_position(mut self, position: impl GeoPoint<Num = f64>) -> Self {
        self.position = Some(GeoPoint2d::from(&position));
        self.projected_position = None;
        self
    }

    /// Sets the center point of the map to the given geographical coordinates (in degrees).
    ///
    /// Replaces the values set by the [`MapBuilder::with_projected_position()`] and
    /// [`MapBuilder::with_position()`] methods.
    ///
    /// Defaults to `[0, 0]`.
    pub fn with_latlon(self, lat: f64, lon: f64) -> Self {
        self.with_position(latlon!(lat, lon))
    }

    /// Sets the center point of the map to the coordinates in the projected CRS.
    ///
    /// Replaces the values set by the [`MapBuilder::with_position`] and
    /// [`MapBuilder::with_latlon()`] methods.
    ///
    /// Defaults to `[0, 0]`.
    pub fn with_projected_position(mut self, position: impl CartesianPoint2d<Num = f64>) -> Self {
        self.projected_position = Some(Point2::new(position.x(), position.y()));
        self.position = None;
        self
    }

    /// Sets the [resolution](MapView::resolution()) of the map.
    ///
    /// Replaces the value set by the [`MapBuilder::with_z_level`] method.
    ///
    /// Defaults to `9783.939620500008`, which corresponds to z-level 4 on the standard Web
    /// Mercator tile schema used by most services.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = Some(resolution);
        self.z_level = None;
        self
    }

    /// Sets the [resolution](MapView::resolution()) of the map to the resolution corresponding
    /// to the given z-level.
    ///
    /// Z-level is the index of a level of detail in a [`TileSchema`](crate::TileSchema). The
    /// map itself does not have a tile schema, so the builder looks through the layers added by
    /// the [`MapBuilder::with_layer()`] method and uses the tile schema of the first layer that
    /// has one.
    ///
    /// If no layer has a tile schema, or the schema has no such z-level, the default resolution
    /// value is used.
    pub fn with_z_level(mut self, z_level: u32) -> Self {
        self.z_level = Some(z_level);
        self.resolution = None;
        self
    }

    /// Adds a layer at the top of the map.
    pub fn with_layer(mut self, layer: impl Layer + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Sets a [messenger](Messenger) implementation to the map.
    pub fn with_messenger(mut self, messenger: impl Messenger + 'static) -> Self {
        self.messenger = Some(Box::new(messenger));
        self
    }

    /// Attaches an application dataset to the map.
    ///
    /// The map stores the value without validating or transforming it and returns it verbatim
    /// from [`Map::dataset`]. This replaces the pattern of handing data to the widget through
    /// global scope: whatever produces the dataset passes it to the builder directly.
    pub fn with_dataset(mut self, dataset: Value) -> Self {
        self.dataset = Some(dataset);
        self
    }

    /// Consumes the builder and creates a map instance.
    ///
    /// If some of the parameters were not specified, they are set to the default values.
    pub fn build(self) -> Map {
        let MapBuilder {
            position,
            projected_position,
            resolution,
            z_level,
            layers,
            messenger,
            dataset,
        } = self;

        let resolution = if let Some(z_level) = z_level {
            match layers.iter().filter_map(|layer| layer.tile_schema()).next() {
                Some(schema) => schema.lod_resolution(z_level).unwrap_or(DEFAULT_RESOLUTION),
                None => DEFAULT_RESOLUTION,
            }
        } else {
            resolution.unwrap_or(DEFAULT_RESOLUTION)
        };

        let view = if let Some(position) = position {
            MapView::new(&position, resolution)
        } else {
            let projected_position = projected_position.unwrap_or_default();
            MapView::new_projected(&projected_position, resolution)
        };

        if let Some(dataset) = &dataset {
            log::debug!("Map initialized with injected dataset: {dataset}");
        }

        let mut map = Map::new(view, layers.into(), messenger);
        map.dataset = dataset;
        map
    }
}
