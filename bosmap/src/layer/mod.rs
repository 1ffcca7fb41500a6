//! [Layers](Layer) specify a data source and the way its data is fetched for the visible part
//! of the map.

use std::any::Any;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::layer::attribution::Attribution;
use crate::messenger::Messenger;
use crate::view::MapView;
use crate::TileSchema;

pub mod attribution;
pub mod data_provider;
pub mod raster_tile_layer;

pub use raster_tile_layer::RasterTileLayer;

/// Layers specify a data source and the way the data should be fetched for a map view.
///
/// A layer does not render anything by itself. When the map view changes, the map calls
/// [`Layer::prepare`], giving the layer a chance to start loading whatever data the new
/// viewport requires. The embedding application is notified through the layer's
/// [`Messenger`] when new data becomes available.
pub trait Layer: Send + Sync {
    /// Starts loading the data needed to display the layer in the given view. Returns
    /// immediately; loading proceeds in background tasks.
    fn prepare(&self, view: &MapView);

    /// Sets the messenger for the layer. Messenger is used to notify the application when the
    /// layer thinks it should be updated on the screen.
    fn set_messenger(&mut self, messenger: Box<dyn Messenger>);

    /// A map stores layers as trait objects. This method can be used to convert the trait
    /// object into the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// A map stores layers as trait objects. This method can be used to convert the trait
    /// object into the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Tile schema of the layer if any.
    fn tile_schema(&self) -> Option<TileSchema> {
        None
    }

    /// Returns the attribution of the layer, if available.
    fn attribution(&self) -> Option<Attribution>;
}

impl<T: Layer + 'static> Layer for Arc<RwLock<T>> {
    fn prepare(&self, view: &MapView) {
        self.read().prepare(view)
    }

    fn set_messenger(&mut self, messenger: Box<dyn Messenger>) {
        self.write().set_messenger(messenger)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn tile_schema(&self) -> Option<TileSchema> {
        self.read().tile_schema()
    }

    fn attribution(&self) -> Option<Attribution> {
        self.read().attribution()
    }
}
