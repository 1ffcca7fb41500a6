//! Building blocks for layer data loading: URL sources and persistent caches.

mod file_cache;
mod url_template;

pub use file_cache::FileCacheController;
pub use url_template::TileUrlTemplate;

use crate::error::BosmapError;

/// Function that returns a URL to load a data item with the given key from.
pub trait UrlSource<Key>: (Fn(&Key) -> String) + Send + Sync {}
impl<Key, T: Fn(&Key) -> String + Send + Sync> UrlSource<Key> for T {}

/// Stores loaded data items between application runs.
pub trait PersistentCacheController<Key: ?Sized, Data>: Send + Sync {
    /// Retrieves the data item with the given key from the cache.
    fn get(&self, key: &Key) -> Option<Data>;

    /// Stores the data item with the given key to the cache.
    fn insert(&self, key: &Key, data: &Data) -> Result<(), BosmapError>;
}
