//! Canonical types for callers of the cache

pub use crate::cache::{CacheStore, Catalog, CatalogRecord, HttpDateParseError, ResourceKey, httpdate};
pub use crate::client::{CacheStats, CacheStatsSnapshot, FetchOutcome, UrlCache};
pub use crate::config::{CacheConfig, MissingContentLength};
pub use crate::error::{Error, Kind, Result};
pub use crate::http::{ConditionalRequest, ParsedUrl, ResponseHead};
pub use crate::protocols::Exchange;

/// Alias used by callers that deal with several error types
pub type UrlCacheError = Error;
