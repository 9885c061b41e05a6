//! # urlcache client
//!
//! Blocking HTTP/1.1 client that mirrors resources into a local directory and
//! revalidates them with conditional GETs (`If-Modified-Since` /
//! `Last-Modified` / `304 Not Modified`).
//!
//! The request is written and the response framed by hand: the header block
//! is read up to the first empty line and the body is exactly
//! `Content-Length` bytes. The `http` crate only provides status and header
//! vocabulary types.
//!
//! A catalog maps each resource to the `Last-Modified` of its cached copy. It
//! is persisted as an append-only log; duplicate records are reduced to the
//! newest one when the cache is opened.
//!
//! ## Usage
//!
//! ```no_run
//! use urlcache_client::{CacheConfig, UrlCache};
//!
//! let mut cache = UrlCache::open(CacheConfig::new("cache"))?;
//! cache.fetch("example.com/index.html")?;
//! let modified = cache.last_modified("example.com/index.html")?;
//! # let _ = modified;
//! # Ok::<(), urlcache_client::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod cache;
pub mod client;
pub mod config;
pub mod connect;
pub mod error;
pub mod http;
pub mod protocols;

pub mod prelude;

pub use crate::prelude::*;
