use std::error::Error as StdError;
use std::io;

use super::helpers::TimedOut;
use super::types::{Error, Kind};

impl Error {
    /// Returns true if the error came from an invalid URL or configuration.
    #[must_use]
    pub fn is_builder(&self) -> bool {
        matches!(self.inner.kind, Kind::Builder)
    }

    /// Returns true if the error is a connect, read or write failure.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self.inner.kind, Kind::Network)
    }

    /// Returns true if the response could not be framed or parsed.
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self.inner.kind, Kind::Protocol)
    }

    /// Returns true if local storage failed.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self.inner.kind, Kind::Io)
    }

    /// Returns true if the queried resource has no catalog entry.
    #[must_use]
    pub fn is_not_cached(&self) -> bool {
        matches!(self.inner.kind, Kind::NotCached)
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<TimedOut>() {
                return true;
            }
            if let Some(io) = err.downcast_ref::<io::Error>() {
                if matches!(io.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) {
                    return true;
                }
            }
            source = err.source();
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error;

    #[test]
    fn kinds_classify() {
        assert!(error::network("refused").is_network());
        assert!(error::protocol("bad status").is_protocol());
        assert!(error::io("disk full").is_io());
        assert!(error::not_cached("example.com/a").is_not_cached());
        assert!(error::builder("no path").is_builder());
    }

    #[test]
    fn timeout_detected_through_io_source() {
        let err = error::network(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));
        assert!(err.is_timeout());
        assert!(!error::network("refused").is_timeout());
    }

    #[test]
    fn display_includes_url_and_source() {
        let err = error::not_cached("example.com/a.txt");
        assert_eq!(err.to_string(), "resource is not cached for example.com/a.txt");

        let err = error::protocol("truncated body");
        assert_eq!(err.to_string(), "malformed http response: truncated body");
    }
}
