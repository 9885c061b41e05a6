//! On-disk object store
//!
//! Each cached object lives at `root/<key segments>`. Updates replace the
//! file wholesale: the old file is removed, a new one is created and the body
//! is written verbatim.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::cache_key::ResourceKey;
use super::catalog::Catalog;
use crate::error::{self, Result};

#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Open the store rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the root directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| error::io(e).with_url(root.display().to_string()))?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the object for `key`
    #[must_use]
    pub fn path_for(&self, key: &ResourceKey) -> PathBuf {
        key.cache_path(&self.root)
    }

    /// Replace the object for `key` with `bytes` and record `last_modified`
    ///
    /// The catalog is only updated once the body is fully written.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the parent directories, the file or the catalog
    /// record cannot be written. A failure after the old file was removed
    /// leaves no object or a partial one; the next successful fetch replaces it.
    pub fn write(
        &self,
        catalog: &mut Catalog,
        key: &ResourceKey,
        bytes: &[u8],
        last_modified: SystemTime,
    ) -> Result<PathBuf> {
        let path = self.path_for(key);
        let io_err = |e: std::io::Error| error::io(e).with_url(path.display().to_string());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(io_err(e)),
        }

        let mut file = File::create(&path).map_err(io_err)?;
        file.write_all(bytes).map_err(io_err)?;
        file.sync_data().map_err(io_err)?;

        catalog.put(key.clone(), last_modified)?;

        tracing::debug!(
            target: "urlcache::cache::store",
            key = %key,
            path = %path.display(),
            bytes = bytes.len(),
            "Stored object"
        );

        Ok(path)
    }

    /// Read the stored object for `key`, if any
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read.
    pub fn read(&self, key: &ResourceKey) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(error::io(e).with_url(path.display().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn key(raw: &str) -> ResourceKey {
        ResourceKey::from_raw(raw)
    }

    #[test]
    fn write_creates_directories_and_records_instant() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path().join("cache")).unwrap();
        let mut catalog = Catalog::load(dir.path().join("cache/catalog")).unwrap();
        let instant = SystemTime::UNIX_EPOCH + Duration::from_secs(1_672_653_600);

        let path = store
            .write(&mut catalog, &key("example.com/img/logo.png"), b"\x89PNG\r\n\x1a\n\x00", instant)
            .unwrap();

        assert_eq!(path, dir.path().join("cache/example.com/img/logo.png"));
        assert_eq!(fs::read(&path).unwrap(), b"\x89PNG\r\n\x1a\n\x00");
        assert_eq!(
            catalog.get(&key("example.com/img/logo.png")).unwrap().modified().unwrap(),
            instant
        );
    }

    #[test]
    fn write_replaces_longer_previous_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let mut catalog = Catalog::load(dir.path().join("catalog")).unwrap();
        let k = key("example.com/a.txt");

        store.write(&mut catalog, &k, b"a much longer first version", SystemTime::UNIX_EPOCH).unwrap();
        store.write(&mut catalog, &k, b"v2", SystemTime::UNIX_EPOCH).unwrap();

        assert_eq!(store.read(&k).unwrap().unwrap(), b"v2");
    }

    #[test]
    fn failed_write_leaves_catalog_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let mut catalog = Catalog::load(dir.path().join("catalog")).unwrap();

        // A regular file where a directory is needed.
        fs::write(dir.path().join("example.com"), b"in the way").unwrap();
        let err = store
            .write(&mut catalog, &key("example.com/a.txt"), b"x", SystemTime::UNIX_EPOCH)
            .unwrap_err();

        assert!(err.is_io());
        assert!(catalog.is_empty());
    }

    #[test]
    fn read_missing_object_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        assert!(store.read(&key("example.com/nothing")).unwrap().is_none());
    }
}
