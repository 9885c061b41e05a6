//! Resource keys and the cache file layout derived from them

use std::fmt;
use std::path::{Path, PathBuf};

use crate::http::url::{DEFAULT_PORT, ParsedUrl};

/// File name used when a resource path names a directory
pub const DIRECTORY_INDEX: &str = "index.html";

/// Normalized `host + path` identity of a cached resource
///
/// An explicit default port is dropped, so `example.com:80/a` and
/// `example.com/a` share a key. Other ports stay in the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Key for a parsed URL
    pub fn new(url: &ParsedUrl) -> Self {
        if url.port == DEFAULT_PORT {
            Self(format!("{}{}", url.host, url.path))
        } else {
            Self(format!("{}:{}{}", url.host, url.port, url.path))
        }
    }

    /// Wrap a key read back from the catalog log
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the cached object relative to the cache root
    ///
    /// Empty, `.` and `..` segments are dropped so a key can never escape the
    /// cache root. A key ending in `/` maps to [`DIRECTORY_INDEX`].
    ///
    /// The mapping is not injective: `h/docs/` and `h/docs/index.html` are
    /// distinct catalog keys that share one file, and likewise keys that
    /// differ only in dropped segments. Whichever of them was fetched last
    /// owns the file contents.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .0
            .split('/')
            .filter(|segment| !matches!(*segment, "" | "." | ".."))
            .collect();

        if self.0.ends_with('/') || path.components().count() < 2 {
            path.push(DIRECTORY_INDEX);
        }

        path
    }

    /// Absolute location of the cached object under `root`
    #[must_use]
    pub fn cache_path(&self, root: &Path) -> PathBuf {
        root.join(self.relative_path())
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(url: &str) -> ResourceKey {
        ResourceKey::new(&ParsedUrl::parse(url).unwrap())
    }

    #[test]
    fn default_port_normalizes_away() {
        assert_eq!(key("example.com:80/a.txt"), key("example.com/a.txt"));
        assert_eq!(key("example.com/a.txt").as_str(), "example.com/a.txt");
    }

    #[test]
    fn other_ports_stay_distinct() {
        assert_ne!(key("example.com:8080/a.txt"), key("example.com/a.txt"));
        assert_eq!(key("example.com:8080/a.txt").as_str(), "example.com:8080/a.txt");
    }

    #[test]
    fn relative_path_follows_segments() {
        assert_eq!(
            key("example.com/img/logo.png").relative_path(),
            Path::new("example.com/img/logo.png")
        );
    }

    #[test]
    fn directory_paths_get_an_index_file() {
        assert_eq!(key("example.com/").relative_path(), Path::new("example.com/index.html"));
        assert_eq!(
            key("example.com/docs/").relative_path(),
            Path::new("example.com/docs/index.html")
        );
    }

    #[test]
    fn dot_segments_cannot_escape_root() {
        let path = key("example.com/../../etc/passwd").cache_path(Path::new("/srv/cache"));
        assert_eq!(path, Path::new("/srv/cache/example.com/etc/passwd"));
    }

    #[test]
    fn directory_key_shares_file_with_explicit_index() {
        let directory = key("h/docs/");
        let explicit = key("h/docs/index.html");

        assert_ne!(directory, explicit);
        assert_eq!(directory.relative_path(), explicit.relative_path());
        assert_eq!(directory.relative_path(), PathBuf::from("h/docs/index.html"));
    }
}
