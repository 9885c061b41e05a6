//! Scheme-less URL parsing
//!
//! Cache URLs are written `host[:port]/path`. The authority is everything
//! before the first `/`; the remainder (re-prefixed with `/`) is the request
//! path, sent verbatim.

use std::fmt;

use thiserror::Error;

use crate::error::{self, Result};

/// Port used when the authority names none
pub const DEFAULT_PORT: u16 = 80;

/// URL parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlParseError {
    #[error("URL has no path component")]
    MissingPath,
    #[error("URL has an empty host")]
    EmptyHost,
    #[error("invalid port {0:?}")]
    InvalidPort(String),
    #[error("URL contains control or whitespace character {0:?}")]
    InvalidCharacter(char),
}

/// A URL split into the pieces needed to open a connection and name a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedUrl {
    pub host: String,
    pub port: u16,
    /// Absolute request path, always starting with `/`
    pub path: String,
}

impl ParsedUrl {
    /// Parse `host[:port]/path`
    ///
    /// A leading `http://` is tolerated. Beyond rejecting control and
    /// whitespace characters, no validation of host syntax is performed.
    ///
    /// # Errors
    ///
    /// Returns a builder error if the input has no `/`, an empty host, a
    /// non-numeric port, or a control or whitespace character in the host or
    /// path.
    pub fn parse(url: &str) -> Result<Self> {
        Self::split(url).map_err(|e| error::invalid_url(e, url))
    }

    fn split(url: &str) -> std::result::Result<Self, UrlParseError> {
        let url = url.trim();
        let url = url.strip_prefix("http://").unwrap_or(url);

        let (authority, path) = url.split_once('/').ok_or(UrlParseError::MissingPath)?;

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => {
                let port = port.trim();
                let port = port
                    .parse::<u16>()
                    .map_err(|_| UrlParseError::InvalidPort(port.to_string()))?;
                (host.trim(), port)
            }
            None => (authority.trim(), DEFAULT_PORT),
        };

        if host.is_empty() {
            return Err(UrlParseError::EmptyHost);
        }

        // Host and path end up in the request line and in catalog log lines.
        if let Some(c) = host
            .chars()
            .chain(path.chars())
            .find(|c| c.is_control() || c.is_whitespace())
        {
            return Err(UrlParseError::InvalidCharacter(c));
        }

        Ok(Self {
            host: host.to_string(),
            port,
            path: format!("/{path}"),
        })
    }

    /// Value of the `Host` request header
    #[must_use]
    pub fn host_header(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port == DEFAULT_PORT {
            write!(f, "{}{}", self.host, self.path)
        } else {
            write!(f, "{}:{}{}", self.host, self.port, self.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_and_path_with_default_port() {
        let url = ParsedUrl::parse("people.ucalgary.ca/~mghaderi/index.html").unwrap();
        assert_eq!(url.host, "people.ucalgary.ca");
        assert_eq!(url.port, 80);
        assert_eq!(url.path, "/~mghaderi/index.html");
    }

    #[test]
    fn explicit_port() {
        let url = ParsedUrl::parse("localhost:8080/a/b.txt").unwrap();
        assert_eq!(url.host, "localhost");
        assert_eq!(url.port, 8080);
        assert_eq!(url.path, "/a/b.txt");
        assert_eq!(url.host_header(), "localhost:8080");
    }

    #[test]
    fn root_path_and_scheme_prefix() {
        let url = ParsedUrl::parse("http://example.com/").unwrap();
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path, "/");
    }

    #[test]
    fn only_first_slash_splits() {
        let url = ParsedUrl::parse("example.com/a:b/c?d=e").unwrap();
        assert_eq!(url.host, "example.com");
        assert_eq!(url.port, 80);
        assert_eq!(url.path, "/a:b/c?d=e");
    }

    #[test]
    fn malformed_inputs_are_builder_errors() {
        for bad in ["example.com", ":80/a", "example.com:http/a", "example.com:99999/a"] {
            let err = ParsedUrl::parse(bad).unwrap_err();
            assert!(err.is_builder(), "{bad} should be rejected");
            assert_eq!(err.url(), Some(bad));
        }
    }

    #[test]
    fn line_breaks_and_spaces_are_rejected() {
        let err = ParsedUrl::split("example.com/a\r\nX-Injected: 1\r\nb").unwrap_err();
        assert_eq!(err, UrlParseError::InvalidCharacter('\r'));

        for bad in ["example.com/a b.txt", "exa\tmple.com/a", "example.com/a\nb", "example.com/\u{7f}"] {
            let err = ParsedUrl::parse(bad).unwrap_err();
            assert!(err.is_builder(), "{bad:?} should be rejected");
        }

        // Surrounding whitespace is still trimmed.
        assert_eq!(ParsedUrl::parse("  example.com/a.txt\n").unwrap().path, "/a.txt");
    }
}
