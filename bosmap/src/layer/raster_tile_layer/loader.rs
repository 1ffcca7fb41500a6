use async_trait::async_trait;
use bytes::Bytes;

use crate::decoded_image::DecodedImage;
use crate::error::BosmapError;
use crate::layer::data_provider::{PersistentCacheController, UrlSource};
use crate::tile_schema::TileIndex;

/// Loads tiles for a [`RasterTileLayer`](super::RasterTileLayer).
#[async_trait]
pub trait RasterTileLoader: Send + Sync {
    /// Loads the tile with the given index.
    async fn load(&self, index: TileIndex) -> Result<DecodedImage, BosmapError>;
}

/// Tile loader that requests tiles one by one with REST HTTP GET requests.
///
/// This covers any tile service that serves each tile at its own url: the OSM tile protocol,
/// hosted basemap providers such as Mapbox, OSG Tile Map Service (TMS), ArcGis TileService and
/// others.
///
/// If constructed with a [`PersistentCacheController`] it will cache the loaded tiles and only
/// request tiles from the source url if they are not in the cache.
///
/// If configured to use offline mode, it will only use tiles from the cache without attempting
/// to load them from the source. Nevertheless, even in this case the url source must be correct
/// to identify the right entries in the cache.
pub struct RestTileLoader {
    url_source: Box<dyn UrlSource<TileIndex>>,
    cache: Option<Box<dyn PersistentCacheController<str, Bytes>>>,
    offline_mode: bool,
}

impl RestTileLoader {
    /// Creates a new instance of the loader.
    pub fn new(
        url_source: impl UrlSource<TileIndex> + 'static,
        cache: Option<Box<dyn PersistentCacheController<str, Bytes>>>,
        offline_mode: bool,
    ) -> Self {
        Self {
            url_source: Box::new(url_source),
            cache,
            offline_mode,
        }
    }

    async fn download_tile(&self, index: TileIndex) -> Result<Bytes, BosmapError> {
        let url = (self.url_source)(&index);

        if let Some(cache) = &self.cache {
            if let Some(data) = cache.get(&url) {
                return Ok(data);
            }
        }

        if self.offline_mode {
            return Err(BosmapError::NotFound);
        }

        log::info!("Loading {url}");
        let data = reqwest::get(&url)
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        if let Some(cache) = &self.cache {
            if let Err(error) = cache.insert(&url, &data) {
                log::warn!("Failed to write persistent cache entry: {error:?}");
            }
        }

        Ok(data)
    }
}

#[async_trait]
impl RasterTileLoader for RestTileLoader {
    async fn load(&self, index: TileIndex) -> Result<DecodedImage, BosmapError> {
        let bytes = self.download_tile(index).await?;
        DecodedImage::new(&bytes)
    }
}
