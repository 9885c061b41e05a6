//! Conditional-GET cache state
//!
//! - `cache_key`: resource identity and the file layout derived from it
//! - `catalog`: append-only Last-Modified log with newest-wins loading
//! - `http_date`: HTTP-date parsing and formatting
//! - `store`: body files under the cache root

pub mod cache_key;
pub mod catalog;
pub mod http_date;
pub mod store;

pub use cache_key::ResourceKey;
pub use catalog::{Catalog, CatalogRecord};
pub use http_date::{HttpDateParseError, httpdate};
pub use store::CacheStore;
