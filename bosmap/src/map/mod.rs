use bosmap_types::cartesian::Size;
use serde_json::Value;

use crate::messenger::Messenger;
use crate::view::MapView;

mod builder;
mod layer_collection;

pub use builder::MapBuilder;
pub use layer_collection::LayerCollection;

/// Map specifies a set of layers and the view that should be displayed.
///
/// A `Map` is the explicit handle for an initialized map widget: the embedding application
/// creates it once through a [`MapBuilder`], owns it for the lifetime of the widget, and drops
/// it on teardown. There is no global state.
pub struct Map {
    view: MapView,
    layers: LayerCollection,
    messenger: Option<Box<dyn Messenger>>,
    dataset: Option<Value>,
}

impl Map {
    /// Creates a new map.
    pub fn new(
        view: MapView,
        layers: LayerCollection,
        messenger: Option<Box<dyn Messenger + 'static>>,
    ) -> Self {
        Self {
            view,
            layers,
            messenger,
            dataset: None,
        }
    }

    /// Current view of the map.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Returns the list of map's layers.
    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    /// Returns a mutable reference to the list of map's layers.
    pub fn layers_mut(&mut self) -> &mut LayerCollection {
        &mut self.layers
    }

    /// Changes the view of the map to the given one.
    pub fn set_view(&mut self, view: MapView) {
        self.view = view;
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }
    }

    /// Request redraw of the map.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw()
        }
    }

    /// Set the pixel size of the map.
    pub fn set_size(&mut self, new_size: Size) {
        self.view = self.view.with_size(new_size);
    }

    /// Asks all visible layers to load the data needed to display the current view.
    ///
    /// This is the point where network activity starts: neither constructing a map nor
    /// attaching layers to it requests anything from remote services until this method is
    /// called.
    pub fn load_layers(&self) {
        for layer in self.layers.iter_visible() {
            layer.prepare(&self.view);
        }
    }

    /// Dataset attached to the map by the embedding application, if any.
    ///
    /// The map does not interpret this value in any way; it is stored and returned exactly as
    /// it was passed to [`MapBuilder::with_dataset`].
    pub fn dataset(&self) -> Option<&Value> {
        self.dataset.as_ref()
    }

    /// Sets the new event messenger for the map.
    pub fn set_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        let messenger: Option<Box<dyn Messenger>> = if let Some(m) = messenger {
            Some(Box::new(m))
        } else {
            None
        };

        self.messenger = messenger;
    }
}
