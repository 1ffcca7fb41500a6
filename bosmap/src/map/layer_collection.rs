use std::ops::{Index, IndexMut};

use crate::layer::Layer;

/// Collection of layers with some meta-information.
///
/// Layers are kept in the order they should be drawn in. Any layer can be temporarily hidden
/// with the [`LayerCollection::hide`] method. Hidden layers are skipped when the map loads
/// data, but retain their place in the collection.
///
/// Since a map should be able to work with anything implementing the [`Layer`] trait, this
/// collection stores layers as trait objects. You can use downcasting through the `Any` trait
/// to obtain the concrete layer type.
#[derive(Default)]
pub struct LayerCollection(Vec<LayerEntry>);

struct LayerEntry {
    layer: Box<dyn Layer>,
    is_hidden: bool,
}

impl LayerCollection {
    /// Adds a layer to the end of the collection.
    pub fn push(&mut self, layer: impl Layer + 'static) {
        self.0.push(LayerEntry {
            layer: Box::new(layer),
            is_hidden: false,
        });
    }

    /// Number of layers in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no layers in the collection.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hides the layer at the given index from the map.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn hide(&mut self, index: usize) {
        self.0[index].is_hidden = true;
    }

    /// Shows the layer at the given index if it was hidden.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn show(&mut self, index: usize) {
        self.0[index].is_hidden = false;
    }

    /// Returns true if the layer at the given index is hidden.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn is_hidden(&self, index: usize) -> bool {
        self.0[index].is_hidden
    }

    /// Iterates over all layers in the collection, including hidden ones.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Layer> {
        self.0.iter().map(|entry| &*entry.layer)
    }

    /// Iterates over the layers that are not hidden.
    pub fn iter_visible(&self) -> impl Iterator<Item = &dyn Layer> {
        self.0
            .iter()
            .filter(|entry| !entry.is_hidden)
            .map(|entry| &*entry.layer)
    }

    /// Iterates over mutable references to all layers in the collection.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Layer>> {
        self.0.iter_mut().map(|entry| &mut entry.layer)
    }
}

impl From<Vec<Box<dyn Layer>>> for LayerCollection {
    fn from(layers: Vec<Box<dyn Layer>>) -> Self {
        Self(
            layers
                .into_iter()
                .map(|layer| LayerEntry {
                    layer,
                    is_hidden: false,
                })
                .collect(),
        )
    }
}

impl Index<usize> for LayerCollection {
    type Output = dyn Layer;

    fn index(&self, index: usize) -> &Self::Output {
        &*self.0[index].layer
    }
}

impl IndexMut<usize> for LayerCollection {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut *self.0[index].layer
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::layer::attribution::Attribution;
    use crate::view::MapView;
    use crate::Messenger;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct TestLayer(&'static str);

    impl Layer for TestLayer {
        fn prepare(&self, _view: &MapView) {}

        fn set_messenger(&mut self, _messenger: Box<dyn Messenger>) {}

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn attribution(&self) -> Option<Attribution> {
            None
        }
    }

    #[test]
    fn push_and_index() {
        let mut collection = LayerCollection::default();
        assert!(collection.is_empty());

        collection.push(TestLayer("a"));
        collection.push(TestLayer("b"));

        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection[1].as_any().downcast_ref(),
            Some(&TestLayer("b"))
        );
    }

    #[test]
    fn hide_and_show() {
        let mut collection = LayerCollection::default();
        collection.push(TestLayer("a"));
        collection.push(TestLayer("b"));

        collection.hide(0);
        assert!(collection.is_hidden(0));
        assert_eq!(collection.iter().count(), 2);
        assert_eq!(collection.iter_visible().count(), 1);

        collection.show(0);
        assert!(!collection.is_hidden(0));
        assert_eq!(collection.iter_visible().count(), 2);
    }
}
