//! Fluent construction of a [`UrlCache`](urlcache_client::UrlCache)

pub mod core;
pub mod options;

pub use self::core::*;
