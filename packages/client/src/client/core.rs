//! Core URL cache implementation
//!
//! [`UrlCache`] owns the configuration, the catalog and the object store.
//! Every fetch is one blocking connect → write → read → parse → store
//! sequence. `fetch` takes `&mut self`, which serializes catalog and store
//! updates for an instance without any locking.

use std::path::PathBuf;
use std::time::SystemTime;

use bytes::Bytes;

use super::stats::{CacheStats, CacheStatsSnapshot};
use crate::cache::{CacheStore, Catalog, ResourceKey};
use crate::config::{CacheConfig, validate_config};
use crate::error::{self, Result};
use crate::http::{ConditionalRequest, ParsedUrl};
use crate::protocols::{Exchange, execute};

/// What a fetch did to the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A new representation was stored
    Downloaded {
        key: ResourceKey,
        path: PathBuf,
        body: Bytes,
        last_modified: SystemTime,
    },
    /// The server answered `304`; store and catalog were left alone
    NotModified { key: ResourceKey },
}

impl FetchOutcome {
    #[must_use]
    pub fn key(&self) -> &ResourceKey {
        match self {
            FetchOutcome::Downloaded { key, .. } | FetchOutcome::NotModified { key } => key,
        }
    }

    #[must_use]
    pub fn is_not_modified(&self) -> bool {
        matches!(self, FetchOutcome::NotModified { .. })
    }
}

/// Conditional-GET URL cache
#[derive(Debug)]
pub struct UrlCache {
    config: CacheConfig,
    catalog: Catalog,
    store: CacheStore,
    stats: CacheStats,
}

impl UrlCache {
    /// Open a cache with the given configuration
    ///
    /// Creates the cache directory if it does not exist and loads the catalog
    /// log, reducing duplicate records to the newest per resource.
    ///
    /// # Errors
    ///
    /// Returns a builder error for an invalid configuration and an I/O error if
    /// the directory cannot be created or the catalog cannot be read.
    pub fn open(config: CacheConfig) -> Result<Self> {
        validate_config(&config).map_err(error::configuration)?;

        let store = CacheStore::open(&config.cache_dir)?;
        let catalog = Catalog::load(config.catalog_path())?;

        tracing::info!(
            target: "urlcache::client",
            cache_dir = %store.root().display(),
            entries = catalog.len(),
            "Opened URL cache"
        );

        Ok(Self {
            config,
            catalog,
            store,
            stats: CacheStats::new(),
        })
    }

    /// Download `url` unless the cached copy is still current
    ///
    /// The request carries `If-Modified-Since` from the catalog, or the epoch
    /// sentinel when the resource was never fetched. A `304` leaves the cache
    /// untouched; any other response replaces the cached object and records its
    /// `Last-Modified`.
    ///
    /// # Errors
    ///
    /// Network errors for transport failures, protocol errors for malformed
    /// responses, I/O errors for local storage failures, and builder errors
    /// for URLs without a path.
    pub fn fetch(&mut self, url: &str) -> Result<FetchOutcome> {
        let result = self.fetch_inner(url);
        if let Err(ref e) = result {
            self.stats.record_failure();
            tracing::warn!(
                target: "urlcache::client",
                url,
                error = %e,
                "Fetch failed"
            );
        }
        result
    }

    fn fetch_inner(&mut self, url: &str) -> Result<FetchOutcome> {
        let parsed = ParsedUrl::parse(url)?;
        let request =
            ConditionalRequest::build(&parsed, &self.catalog, self.config.user_agent.as_deref());

        tracing::debug!(
            target: "urlcache::client",
            key = %request.key,
            if_modified_since = %request.if_modified_since,
            "Sending conditional request"
        );

        match execute(&parsed, &request, &self.config)? {
            Exchange::NotModified { .. } => {
                self.stats.record_not_modified();
                Ok(FetchOutcome::NotModified { key: request.key })
            }
            Exchange::Modified {
                body,
                last_modified,
                ..
            } => {
                let path = self
                    .store
                    .write(&mut self.catalog, &request.key, &body, last_modified)?;
                self.stats.record_download(body.len() as u64);

                Ok(FetchOutcome::Downloaded {
                    key: request.key,
                    path,
                    body,
                    last_modified,
                })
            }
        }
    }

    /// Last-Modified instant recorded for `url`
    ///
    /// # Errors
    ///
    /// Returns `NotCached` if the resource has no catalog entry and a protocol
    /// error if the stored timestamp cannot be parsed.
    pub fn last_modified(&self, url: &str) -> Result<SystemTime> {
        let key = ResourceKey::new(&ParsedUrl::parse(url)?);
        let record = self
            .catalog
            .get(&key)
            .ok_or_else(|| error::not_cached(url))?;
        record
            .modified()
            .map_err(|e| error::protocol(e).with_url(url))
    }

    /// Path of the cached object for `url`, if it has been fetched
    ///
    /// # Errors
    ///
    /// Returns `NotCached` if the resource has no catalog entry.
    pub fn cached_path(&self, url: &str) -> Result<PathBuf> {
        let key = ResourceKey::new(&ParsedUrl::parse(url)?);
        if self.catalog.get(&key).is_none() {
            return Err(error::not_cached(url));
        }
        Ok(self.store.path_for(&key))
    }

    /// Rewrite the catalog log with one record per resource
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the log cannot be rewritten.
    pub fn compact_catalog(&self) -> Result<usize> {
        self.catalog.compact()
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    #[inline]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    #[inline]
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }
}
