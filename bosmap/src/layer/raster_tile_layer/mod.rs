//! Raster tile layer and its loaders.

use std::any::Any;
use std::sync::Arc;

use quick_cache::sync::Cache;

use super::Layer;
use crate::decoded_image::DecodedImage;
use crate::layer::attribution::Attribution;
use crate::messenger::Messenger;
use crate::tile_schema::{TileIndex, TileSchema};
use crate::view::MapView;

mod builder;
mod loader;

pub use builder::{RasterTileLayerBuilder, MAPBOX_URL_TEMPLATE};
pub use loader::{RasterTileLoader, RestTileLoader};

const TILE_CACHE_SIZE: usize = 5000;

/// Raster tile layers request prerendered tile images from a remote service, one tile per
/// viewport cell, and keep them available for the embedding application to display.
///
/// Tiles are loaded at most once: a tile that failed to load is recorded as failed and is not
/// retried, matching the permissive behavior of web map widgets where a missing tile simply
/// shows as a blank square.
pub struct RasterTileLayer {
    loader: Arc<dyn RasterTileLoader>,
    tile_schema: TileSchema,
    tiles: Arc<Cache<TileIndex, Arc<TileState>>>,
    messenger: Option<Arc<dyn Messenger>>,
    attribution: Option<Attribution>,
}

impl std::fmt::Debug for RasterTileLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterTileLayer")
            .field("tile_schema", &self.tile_schema)
            .finish()
    }
}

enum TileState {
    Loading,
    Loaded(DecodedImage),
    Error,
}

impl RasterTileLayer {
    /// Creates a new layer.
    pub fn new(
        tile_schema: TileSchema,
        loader: impl RasterTileLoader + 'static,
        messenger: Option<Arc<dyn Messenger>>,
    ) -> Self {
        Self {
            loader: Arc::new(loader),
            tile_schema,
            tiles: Arc::new(Cache::new(TILE_CACHE_SIZE)),
            messenger,
            attribution: None,
        }
    }

    fn new_raw(
        loader: Box<dyn RasterTileLoader>,
        tile_schema: TileSchema,
        messenger: Option<Box<dyn Messenger>>,
        attribution: Option<Attribution>,
    ) -> Self {
        Self {
            loader: loader.into(),
            tile_schema,
            tiles: Arc::new(Cache::new(TILE_CACHE_SIZE)),
            messenger: messenger.map(|messenger| messenger.into()),
            attribution,
        }
    }

    async fn load_tile(
        index: TileIndex,
        loader: Arc<dyn RasterTileLoader>,
        tiles: &Cache<TileIndex, Arc<TileState>>,
        messenger: Option<Arc<dyn Messenger>>,
    ) {
        match tiles.get_value_or_guard_async(&index).await {
            Ok(_) => {}
            Err(guard) => {
                let _ = guard.insert(Arc::new(TileState::Loading));
                let load_result = loader.load(index).await;

                match load_result {
                    Ok(decoded_image) => {
                        tiles.insert(index, Arc::new(TileState::Loaded(decoded_image)));

                        if let Some(messenger) = messenger {
                            messenger.request_redraw();
                        }
                    }
                    Err(err) => {
                        log::debug!("Failed to load tile {index:?}: {err}");
                        tiles.insert(index, Arc::new(TileState::Error));
                    }
                }
            }
        }
    }

    /// Loads all tiles needed to display the given `view`, awaiting their completion.
    pub async fn load_tiles(&self, view: &MapView) {
        if let Some(iter) = self.tile_schema.iter_tiles(view) {
            for index in iter {
                let loader = self.loader.clone();
                let messenger = self.messenger.clone();
                Self::load_tile(index, loader, &self.tiles, messenger).await;
            }
        }
    }

    /// Returns the decoded image of the given tile, if it has been loaded.
    pub fn tile_image(&self, index: TileIndex) -> Option<DecodedImage> {
        match self.tiles.get(&index).as_deref() {
            Some(TileState::Loaded(image)) => Some(image.clone()),
            _ => None,
        }
    }

    /// Returns tile schema of the layer.
    pub fn tile_schema(&self) -> &TileSchema {
        &self.tile_schema
    }
}

impl Layer for RasterTileLayer {
    fn prepare(&self, view: &MapView) {
        let Some(iter) = self.tile_schema.iter_tiles(view) else {
            return;
        };

        for index in iter {
            let loader = self.loader.clone();
            let tiles = self.tiles.clone();
            let messenger = self.messenger.clone();
            crate::async_runtime::spawn(async move {
                Self::load_tile(index, loader, &tiles, messenger).await;
            });
        }
    }

    fn set_messenger(&mut self, messenger: Box<dyn Messenger>) {
        self.messenger = Some(messenger.into());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn tile_schema(&self) -> Option<TileSchema> {
        Some(self.tile_schema.clone())
    }

    fn attribution(&self) -> Option<Attribution> {
        self.attribution.clone()
    }
}
