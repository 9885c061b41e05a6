//! Cache client configuration
//!
//! `CacheConfig` holds the storage locations, transport timeouts and framing
//! limits used by [`crate::UrlCache`]. Values can be set through the `with_*`
//! builder methods or loaded from a JSON document.

pub mod core;
pub mod loader;
pub mod timeouts;
pub mod validation;

pub use self::core::{CacheConfig, MissingContentLength};
pub use validation::validate_config;
