//! Conditional GET request construction

use std::time::SystemTime;

use super::url::ParsedUrl;
use crate::cache::cache_key::ResourceKey;
use crate::cache::catalog::Catalog;
use crate::cache::http_date::httpdate;

/// A serialized conditional GET plus the key its response belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalRequest {
    pub key: ResourceKey,
    /// Value sent in `If-Modified-Since`
    pub if_modified_since: String,
    /// Complete request bytes, header block terminator included
    pub bytes: Vec<u8>,
}

impl ConditionalRequest {
    /// Build the request for `url`, conditioned on the catalog entry for its key
    ///
    /// With no usable entry the epoch sentinel is sent, which makes the first
    /// request for any resource effectively unconditional.
    pub fn build(url: &ParsedUrl, catalog: &Catalog, user_agent: Option<&str>) -> Self {
        let key = ResourceKey::new(url);
        let cached: Option<SystemTime> = catalog
            .get(&key)
            .and_then(|record| record.modified().ok());

        let if_modified_since = match cached {
            Some(instant) => httpdate::fmt_http_date(instant),
            None => httpdate::EPOCH_SENTINEL.to_string(),
        };

        let mut request = format!(
            "GET {} HTTP/1.1\r\nHost: {}\r\nIf-Modified-Since: {}\r\n",
            url.path,
            url.host_header(),
            if_modified_since
        );
        if let Some(agent) = user_agent {
            request.push_str("User-Agent: ");
            request.push_str(agent);
            request.push_str("\r\n");
        }
        request.push_str("\r\n");

        Self {
            key,
            if_modified_since,
            bytes: request.into_bytes(),
        }
    }

    /// True when no cached instant conditioned this request
    #[must_use]
    pub fn is_unconditional(&self) -> bool {
        self.if_modified_since == httpdate::EPOCH_SENTINEL
    }
}
