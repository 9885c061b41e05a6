use std::io;

use super::BoxError;
use super::helpers::TimedOut;
use super::types::{Error, Kind};

/// Creates an `Error` for an invalid URL or configuration value.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for a transport failure.
pub fn network<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Network).with(e.into())
}

/// Creates a network `Error` for a failed socket read or write.
///
/// Socket timeouts surface as `TimedOut` or `WouldBlock` depending on the
/// platform; both become a [`TimedOut`] source.
pub fn network_io(e: io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => network(TimedOut),
        _ => network(e),
    }
}

/// Creates an `Error` for a response that violates the expected framing.
pub fn protocol<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Protocol).with(e.into())
}

/// Creates an `Error` for a local storage failure.
pub fn io<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Io).with(e.into())
}

/// Creates an `Error` for a resource with no catalog entry.
pub fn not_cached(url: impl Into<String>) -> Error {
    Error::new(Kind::NotCached).with_url(url)
}

pub fn invalid_url<E: Into<BoxError>>(e: E, url: &str) -> Error {
    builder(e).with_url(url)
}

pub fn configuration<E: Into<BoxError>>(e: E) -> Error {
    builder(e)
}

pub fn invalid_content_length(value: &str) -> Error {
    protocol(format!("invalid Content-Length value {value:?}"))
}

pub fn missing_content_length() -> Error {
    protocol("response has no Content-Length header")
}
