//! URL cache client
//!
//! `core` ties the URL parser, catalog, transaction engine and store into the
//! two public operations; `stats` counts what they did.

pub mod core;
pub mod stats;

pub use self::core::{FetchOutcome, UrlCache};
pub use stats::{CacheStats, CacheStatsSnapshot};
