use std::path::PathBuf;

use bytes::Bytes;

use super::{RasterTileLayer, RasterTileLoader, RestTileLoader};
use crate::error::BosmapError;
use crate::layer::attribution::Attribution;
use crate::layer::data_provider::{
    FileCacheController, PersistentCacheController, TileUrlTemplate, UrlSource,
};
use crate::tile_schema::TileIndex;
use crate::{Messenger, TileSchema};

/// URL template used by the Mapbox classic raster tile service.
pub const MAPBOX_URL_TEMPLATE: &str =
    "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}";

const MAPBOX_ATTRIBUTION: &str = r#"Map data &copy; <a href="http://openstreetmap.org">OpenStreetMap</a> contributors, <a href="http://creativecommons.org/licenses/by-sa/2.0/">CC-BY-SA</a>, Imagery © <a href="http://mapbox.com">Mapbox</a>"#;

// z-levels 0..=18 on the standard web tile schema
const DEFAULT_LOD_COUNT: u32 = 19;

/// Constructor for a [`RasterTileLayer`].
///
/// ```no_run
/// use bosmap::layer::raster_tile_layer::RasterTileLayerBuilder;
///
/// let layer = RasterTileLayerBuilder::new_rest(|index| {
///     format!(
///         "https://tile.openstreetmap.org/{}/{}/{}.png",
///         index.z, index.x, index.y
///     )
/// })
/// .with_file_cache("target")
/// .build()?;
/// # Ok::<(), bosmap::error::BosmapError>(())
/// ```
pub struct RasterTileLayerBuilder {
    loader_type: LoaderType,
    tile_schema: Option<TileSchema>,
    messenger: Option<Box<dyn Messenger>>,
    cache: CacheType,
    offline_mode: bool,
    attribution: Option<Attribution>,
}

enum LoaderType {
    Rest(Box<dyn UrlSource<TileIndex>>),
    Templated {
        template: String,
        provider_id: String,
        access_token: String,
    },
    Custom(Box<dyn RasterTileLoader>),
}

enum CacheType {
    None,
    File(PathBuf),
    Custom(Box<dyn PersistentCacheController<str, Bytes>>),
}

impl RasterTileLayerBuilder {
    fn new(loader_type: LoaderType) -> Self {
        Self {
            loader_type,
            tile_schema: None,
            messenger: None,
            cache: CacheType::None,
            offline_mode: false,
            attribution: None,
        }
    }

    /// Initializes a builder for a layer that requests tiles from the given url source.
    pub fn new_rest(tile_source: impl UrlSource<TileIndex> + 'static) -> Self {
        Self::new(LoaderType::Rest(Box::new(tile_source)))
    }

    /// Initializes a builder for a layer that requests tiles through a URL template with
    /// `{id}`, `{z}`, `{x}`, `{y}` and `{accessToken}` placeholders.
    ///
    /// The template is validated when the layer is built.
    pub fn new_templated(
        template: impl Into<String>,
        provider_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self::new(LoaderType::Templated {
            template: template.into(),
            provider_id: provider_id.into(),
            access_token: access_token.into(),
        })
    }

    /// Initializes a builder for a raster tile layer with the Mapbox classic raster source.
    ///
    /// `provider_id` selects the hosted tile set, `access_token` authorizes the requests. The
    /// layer is configured with the standard web tile schema (maximum z-level 18) and the
    /// attribution required by the Mapbox terms of service.
    ///
    /// ```no_run
    /// use bosmap::layer::raster_tile_layer::RasterTileLayerBuilder;
    ///
    /// let layer = RasterTileLayerBuilder::new_mapbox("shimolu523.p1g0bd7h", "pk.ey...")
    ///     .build()?;
    /// # Ok::<(), bosmap::error::BosmapError>(())
    /// ```
    pub fn new_mapbox(provider_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            attribution: Some(Attribution::new(MAPBOX_ATTRIBUTION.to_string(), None)),
            ..Self::new_templated(MAPBOX_URL_TEMPLATE, provider_id, access_token)
        }
    }

    /// Initializes a builder for a layer with the given tile loader.
    pub fn new_with_loader(loader: impl RasterTileLoader + 'static) -> Self {
        Self::new(LoaderType::Custom(Box::new(loader)))
    }

    /// Adds a file cache for the tiles in the given folder.
    ///
    /// If the `path` folder doesn't exist it will be created. In case the creation of the
    /// folder fails, building the tile layer will return an error.
    ///
    /// Cannot be used with a custom tile loader given by
    /// [`RasterTileLayerBuilder::new_with_loader()`], as such a loader must have been created
    /// with its cache already configured. In that case building returns an error as well.
    ///
    /// Replaces the value set by the [`RasterTileLayerBuilder::with_cache_controller()`]
    /// method.
    pub fn with_file_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache = CacheType::File(path.into());
        self
    }

    /// Adds the given cache controller to the layer.
    ///
    /// Replaces the value set by the [`RasterTileLayerBuilder::with_file_cache()`] method.
    pub fn with_cache_controller(
        mut self,
        cache: impl PersistentCacheController<str, Bytes> + 'static,
    ) -> Self {
        self.cache = CacheType::Custom(Box::new(cache));
        self
    }

    /// Sets the tile schema of the layer.
    ///
    /// Defaults to the standard web tile schema with maximum z-level 18.
    pub fn with_tile_schema(mut self, tile_schema: TileSchema) -> Self {
        self.tile_schema = Some(tile_schema);
        self
    }

    /// Sets the messenger for the layer.
    pub fn with_messenger(mut self, messenger: impl Messenger + 'static) -> Self {
        self.messenger = Some(Box::new(messenger));
        self
    }

    /// Configures the layer to only take tiles from the cache without requesting them from the
    /// remote service.
    pub fn with_offline_mode(mut self) -> Self {
        self.offline_mode = true;
        self
    }

    /// Sets the attribution of the layer.
    pub fn with_attribution(mut self, attribution: Attribution) -> Self {
        self.attribution = Some(attribution);
        self
    }

    /// Consumes the builder and creates the layer.
    pub fn build(self) -> Result<RasterTileLayer, BosmapError> {
        let Self {
            loader_type,
            tile_schema,
            messenger,
            cache,
            offline_mode,
            attribution,
        } = self;

        let cache = match cache {
            CacheType::None => None,
            CacheType::File(path) => {
                let controller = FileCacheController::new(path)?;
                Some(Box::new(controller) as Box<dyn PersistentCacheController<str, Bytes>>)
            }
            CacheType::Custom(cache) => Some(cache),
        };

        let loader: Box<dyn RasterTileLoader> = match loader_type {
            LoaderType::Rest(url_source) => {
                Box::new(RestTileLoader::new(url_source, cache, offline_mode))
            }
            LoaderType::Templated {
                template,
                provider_id,
                access_token,
            } => {
                let template = TileUrlTemplate::new(template, provider_id, access_token)?;
                Box::new(RestTileLoader::new(
                    template.into_url_source(),
                    cache,
                    offline_mode,
                ))
            }
            LoaderType::Custom(loader) => {
                if cache.is_some() {
                    return Err(BosmapError::Generic(
                        "custom tile loaders cannot be used with a cache configured in the builder"
                            .into(),
                    ));
                }

                loader
            }
        };

        let tile_schema = tile_schema.unwrap_or_else(|| TileSchema::web(DEFAULT_LOD_COUNT));

        Ok(RasterTileLayer::new_raw(
            loader,
            tile_schema,
            messenger,
            attribution,
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::decoded_image::DecodedImage;
    use crate::layer::Layer;

    struct NoopLoader;

    #[async_trait::async_trait]
    impl RasterTileLoader for NoopLoader {
        async fn load(&self, _index: TileIndex) -> Result<DecodedImage, BosmapError> {
            Err(BosmapError::NotFound)
        }
    }

    #[test]
    fn mapbox_preset_schema_and_attribution() {
        let layer = RasterTileLayerBuilder::new_mapbox("shimolu523.p1g0bd7h", "token")
            .build()
            .unwrap();

        assert_eq!(layer.tile_schema().max_z_level(), Some(18));

        let attribution = layer.attribution().unwrap();
        assert_eq!(
            attribution.links(),
            vec![
                "http://openstreetmap.org",
                "http://creativecommons.org/licenses/by-sa/2.0/",
                "http://mapbox.com"
            ]
        );
    }

    #[test]
    fn templated_layer_validates_template() {
        let result =
            RasterTileLayerBuilder::new_templated("https://tiles.test/{bogus}", "id", "token")
                .build();

        assert_matches!(result, Err(BosmapError::UrlTemplate(_)));
    }

    #[test]
    fn custom_loader_rejects_builder_cache() {
        let result = RasterTileLayerBuilder::new_with_loader(NoopLoader)
            .with_file_cache("target")
            .build();

        assert_matches!(result, Err(BosmapError::Generic(_)));
    }

    #[test]
    fn schema_defaults_to_web() {
        let layer = RasterTileLayerBuilder::new_rest(|_: &TileIndex| String::new())
            .build()
            .unwrap();

        assert_eq!(layer.tile_schema(), &TileSchema::web(19));
    }
}
