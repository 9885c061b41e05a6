//! # urlcache
//!
//! Local mirror of HTTP resources kept fresh with conditional GETs.
//!
//! ```no_run
//! let mut cache = urlcache::builder().cache_dir("cache").open()?;
//!
//! // First fetch downloads; later fetches send If-Modified-Since and
//! // leave the cached copy alone on 304.
//! cache.fetch("example.com/index.html")?;
//! let modified = cache.last_modified("example.com/index.html")?;
//! # let _ = modified;
//! # Ok::<(), urlcache::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

use std::path::PathBuf;

pub use builder::*;
pub use urlcache_client::{
    CacheConfig, CacheStatsSnapshot, Error, FetchOutcome, Kind, MissingContentLength, ResourceKey,
    Result, UrlCache, httpdate,
};

/// Create a builder with the default configuration
#[must_use]
pub fn builder() -> UrlCacheBuilder {
    UrlCacheBuilder::new()
}

/// Open a cache rooted at `dir` with default settings
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created or the catalog
/// cannot be read.
pub fn open(dir: impl Into<PathBuf>) -> Result<UrlCache> {
    UrlCacheBuilder::new().cache_dir(dir).open()
}
