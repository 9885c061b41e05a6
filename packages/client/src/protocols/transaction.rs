//! One conditional GET exchange
//!
//! Writes the request, reads the header block, and decides from the status
//! whether a body follows. A `304 Not Modified` ends the exchange without a
//! body read; anything else reads exactly `Content-Length` bytes.

use std::io::{BufReader, Read, Write};
use std::time::SystemTime;

use bytes::Bytes;

use super::wire::{read_body, read_header_block};
use crate::cache::http_date::httpdate;
use crate::config::{CacheConfig, MissingContentLength};
use crate::connect::open_connection;
use crate::error::{self, Result};
use crate::http::request::ConditionalRequest;
use crate::http::response::ResponseHead;
use crate::http::url::ParsedUrl;

/// Outcome of a completed exchange
#[derive(Debug, Clone)]
pub enum Exchange {
    /// The cached copy is still current
    NotModified { head: ResponseHead },
    /// A full representation was received
    Modified {
        head: ResponseHead,
        body: Bytes,
        /// `Last-Modified` of the response, or the Unix epoch when absent
        last_modified: SystemTime,
    },
}

impl Exchange {
    #[must_use]
    pub fn head(&self) -> &ResponseHead {
        match self {
            Exchange::NotModified { head } | Exchange::Modified { head, .. } => head,
        }
    }
}

/// Run `request` over an already-open byte stream
///
/// # Errors
///
/// Write and read failures are network errors. A malformed header block,
/// unparseable `Content-Length` or `Last-Modified`, a missing `Content-Length`
/// under [`MissingContentLength::Reject`], or a truncated body are protocol
/// errors.
pub fn exchange<S: Read + Write>(
    stream: &mut S,
    request: &ConditionalRequest,
    config: &CacheConfig,
) -> Result<Exchange> {
    stream
        .write_all(&request.bytes)
        .and_then(|()| stream.flush())
        .map_err(error::network_io)?;

    let mut reader = BufReader::new(stream);
    let block = read_header_block(&mut reader, config.max_header_bytes)?;
    let head = ResponseHead::parse(&block)?;

    if head.is_not_modified() {
        tracing::debug!(
            target: "urlcache::protocols::transaction",
            key = %request.key,
            if_modified_since = %request.if_modified_since,
            "Resource not modified"
        );
        return Ok(Exchange::NotModified { head });
    }

    let last_modified = match head.last_modified() {
        Some(text) => httpdate::parse_http_date(text).map_err(error::protocol)?,
        None => SystemTime::UNIX_EPOCH,
    };

    let length = match (head.content_length()?, config.missing_content_length) {
        (Some(length), _) => length,
        (None, MissingContentLength::Reject) => return Err(error::missing_content_length()),
        (None, MissingContentLength::TreatAsEmpty) => {
            tracing::warn!(
                target: "urlcache::protocols::transaction",
                key = %request.key,
                "Response has no Content-Length, storing an empty body"
            );
            0
        }
    };

    let body = read_body(&mut reader, length)?;

    if !head.status.is_success() {
        tracing::warn!(
            target: "urlcache::protocols::transaction",
            key = %request.key,
            status = head.status.as_u16(),
            "Caching non-success response"
        );
    }

    Ok(Exchange::Modified {
        head,
        body: Bytes::from(body),
        last_modified,
    })
}

/// Connect to `url`'s origin and run `request`
///
/// # Errors
///
/// Connection failures are network errors; see [`exchange`] for the rest.
pub fn execute(url: &ParsedUrl, request: &ConditionalRequest, config: &CacheConfig) -> Result<Exchange> {
    let mut stream = open_connection(url, config)?;
    exchange(&mut stream, request, config).map_err(|e| e.with_url(request.key.to_string()))
}
