//! Core configuration structure and defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default root directory for cached objects
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Default catalog log file name, relative to the cache directory
pub const DEFAULT_CATALOG_FILE: &str = "catalog";

/// Default cap on the response header block
pub const DEFAULT_MAX_HEADER_BYTES: usize = 64 * 1024;

/// What to do with a non-304 response that carries no `Content-Length`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingContentLength {
    /// Fail the fetch with a protocol error
    #[default]
    Reject,
    /// Store an empty body
    TreatAsEmpty,
}

/// URL cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Root directory holding cached objects and the catalog log
    pub cache_dir: PathBuf,

    /// Catalog log file name, relative to `cache_dir`
    pub catalog_file: PathBuf,

    /// TCP connect timeout
    #[serde(with = "duration_ms")]
    pub connect_timeout: Duration,

    /// Socket read timeout
    #[serde(with = "duration_ms")]
    pub read_timeout: Duration,

    /// Socket write timeout
    #[serde(with = "duration_ms")]
    pub write_timeout: Duration,

    /// Maximum size of the response header block in bytes
    pub max_header_bytes: usize,

    /// Body framing policy when `Content-Length` is absent
    pub missing_content_length: MissingContentLength,

    /// Optional `User-Agent` header; omitted from requests when `None`
    pub user_agent: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            catalog_file: PathBuf::from(DEFAULT_CATALOG_FILE),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            missing_content_length: MissingContentLength::Reject,
            user_agent: None,
        }
    }
}

impl CacheConfig {
    /// Create a configuration rooted at `cache_dir` with default settings
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..Self::default()
        }
    }

    /// Set the cache root directory
    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Set the catalog log file name
    ///
    /// Relative names are resolved against the cache directory.
    #[must_use]
    pub fn with_catalog_file(mut self, catalog_file: impl Into<PathBuf>) -> Self {
        self.catalog_file = catalog_file.into();
        self
    }

    /// Set the header block size limit
    #[must_use]
    pub fn with_max_header_bytes(mut self, max_header_bytes: usize) -> Self {
        self.max_header_bytes = max_header_bytes;
        self
    }

    /// Set the policy for responses without `Content-Length`
    #[must_use]
    pub fn with_missing_content_length(mut self, policy: MissingContentLength) -> Self {
        self.missing_content_length = policy;
        self
    }

    /// Send a `User-Agent` header with every request
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Full path of the catalog log
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        if self.catalog_file.is_absolute() {
            self.catalog_file.clone()
        } else {
            self.cache_dir.join(&self.catalog_file)
        }
    }

    /// Root directory for cached objects
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
