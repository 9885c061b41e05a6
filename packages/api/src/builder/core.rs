//! Core `UrlCacheBuilder` structure
//!
//! The builder collects a [`CacheConfig`] through chained calls and opens the
//! cache at the end. Configuration errors surface from [`UrlCacheBuilder::open`].

use std::path::{Path, PathBuf};

use urlcache_client::{CacheConfig, Result, UrlCache};

/// Fluent builder for [`UrlCache`]
#[derive(Debug, Clone, Default)]
pub struct UrlCacheBuilder {
    pub(crate) config: CacheConfig,
}

impl UrlCacheBuilder {
    /// Start from the default configuration (`./cache`, 10 s connect timeout)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Start from a JSON configuration file
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read and a builder error if
    /// it does not hold a valid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        CacheConfig::from_json_file(path).map(Self::from_config)
    }

    /// Root directory for cached objects and the catalog
    #[must_use]
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_cache_dir(dir);
        self
    }

    /// Catalog log location, relative to the cache directory unless absolute
    #[must_use]
    pub fn catalog_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_catalog_file(file);
        self
    }

    /// The configuration collected so far
    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Validate the configuration and open the cache
    ///
    /// # Errors
    ///
    /// Returns a builder error for invalid settings and an I/O error if the
    /// cache directory or catalog cannot be opened.
    pub fn open(self) -> Result<UrlCache> {
        tracing::debug!(
            target: "urlcache::builder",
            cache_dir = %self.config.cache_dir.display(),
            "Opening cache from builder"
        );
        UrlCache::open(self.config)
    }
}
