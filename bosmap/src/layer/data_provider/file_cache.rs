use std::path::{Path, PathBuf};

use bytes::Bytes;
use log::debug;

use crate::error::BosmapError;
use crate::layer::data_provider::PersistentCacheController;

/// Stores the cached data as a set of files in the specified folder. File names are generated
/// from the request urls.
///
/// Query parameters of the url are not included into the file path, so that access credentials
/// do not end up in file names and the same tile requested with different tokens maps to one
/// cache entry.
///
/// Currently, there is no eviction mechanism.
pub struct FileCacheController {
    folder_path: PathBuf,
}

impl PersistentCacheController<str, Bytes> for FileCacheController {
    fn get(&self, key: &str) -> Option<Bytes> {
        let file_path = self.get_file_path(key);
        if let Ok(bytes) = std::fs::read(file_path) {
            Some(bytes.into())
        } else {
            None
        }
    }

    fn insert(&self, key: &str, data: &Bytes) -> Result<(), BosmapError> {
        let file_path = self.get_file_path(key);
        match file_path.parent() {
            Some(folder) => {
                ensure_folder_exists(folder)?;
                std::fs::write(&file_path, data)?;
                debug!("Entry {key} saved to cache file {file_path:?}");
                Ok(())
            }
            None => {
                debug!("Failed to add {key} entry to the cache {file_path:?} - no parent folder");
                Err(BosmapError::IO)
            }
        }
    }
}

impl FileCacheController {
    /// Creates a new instance. The cache will be located in the given directory. If the
    /// directory doesn't exist, it will be created on startup. Each cached item is stored in a
    /// nested folder structure based on its original url, so different layers can share one
    /// cache directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, BosmapError> {
        ensure_folder_exists(path.as_ref())?;
        Ok(Self {
            folder_path: path.as_ref().into(),
        })
    }

    fn get_file_path(&self, url: &str) -> PathBuf {
        let stripped = if let Some(v) = url.strip_prefix("http://") {
            v
        } else if let Some(v) = url.strip_prefix("https://") {
            v
        } else {
            url
        };

        let stripped = stripped.split('?').next().unwrap_or(stripped);

        self.folder_path.join(Path::new(stripped))
    }
}

fn ensure_folder_exists(folder_path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(folder_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_path_strips_scheme_and_parameters() {
        let dir = std::env::temp_dir().join("bosmap_cache_test");
        let controller = FileCacheController::new(&dir).unwrap();
        let path = controller.get_file_path(
            "https://api.tiles.mapbox.com/v4/some.id/13/0/0.png?access_token=secret",
        );

        assert_eq!(path, dir.join("api.tiles.mapbox.com/v4/some.id/13/0/0.png"));
    }

    #[test]
    fn round_trip() {
        let dir = std::env::temp_dir().join("bosmap_cache_test_rt");
        let _ = std::fs::remove_dir_all(&dir);
        let controller = FileCacheController::new(&dir).unwrap();
        let data = Bytes::from_static(b"tile bytes");

        let url = "http://tiles.test/1/2/3.png";
        assert!(controller.get(url).is_none());
        controller.insert(url, &data).unwrap();
        assert_eq!(controller.get(url), Some(data));
    }
}
