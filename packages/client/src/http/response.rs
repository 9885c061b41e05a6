//! Response head parsing
//!
//! Parses a raw header block (status line plus header lines, terminated by an
//! empty line) into the few facts the cache acts on. All headers are kept in
//! an `http::HeaderMap` for callers that want more.

use http::header::{CONTENT_LENGTH, LAST_MODIFIED};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::error::{self, Result};

/// Parsed status line and headers of a response
#[derive(Debug, Clone)]
pub struct ResponseHead {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl ResponseHead {
    /// Parse a header block as read off the wire
    ///
    /// Only the status line has to be text. Header lines are split as bytes,
    /// so obs-text in a value does not fail the response.
    ///
    /// # Errors
    ///
    /// Returns a protocol error if the status line is not valid text or is
    /// malformed.
    pub fn parse(block: &[u8]) -> Result<Self> {
        let mut lines = block
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line));

        let status_line = lines.next().unwrap_or_default();
        let status_line = std::str::from_utf8(status_line)
            .map_err(|e| error::protocol(format!("status line is not valid text: {e}")))?;
        let status = parse_status_line(status_line)?;

        let mut headers = HeaderMap::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            let Some(colon) = line.iter().position(|&b| b == b':') else {
                tracing::debug!(
                    target: "urlcache::http::response",
                    line = %String::from_utf8_lossy(line),
                    "Ignoring header line without a colon"
                );
                continue;
            };
            let (name, value) = (&line[..colon], &line[colon + 1..]);
            match (
                HeaderName::from_bytes(name.trim_ascii()),
                HeaderValue::from_bytes(value.trim_ascii()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.append(name, value);
                }
                _ => {
                    tracing::debug!(
                        target: "urlcache::http::response",
                        line = %String::from_utf8_lossy(line),
                        "Ignoring unparseable header line"
                    );
                }
            }
        }

        Ok(Self { status, headers })
    }

    #[must_use]
    pub fn is_not_modified(&self) -> bool {
        self.status == StatusCode::NOT_MODIFIED
    }

    /// Body length announced by the first `Content-Length` header
    ///
    /// # Errors
    ///
    /// Returns a protocol error if the header is present but not a
    /// non-negative integer.
    pub fn content_length(&self) -> Result<Option<u64>> {
        let Some(value) = self.headers.get(CONTENT_LENGTH) else {
            return Ok(None);
        };
        let text = value.to_str().unwrap_or_default();
        text.trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| error::invalid_content_length(text))
    }

    /// Text of the first `Last-Modified` header
    #[must_use]
    pub fn last_modified(&self) -> Option<&str> {
        self.headers
            .get(LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
    }
}

fn parse_status_line(line: &str) -> Result<StatusCode> {
    let malformed = || error::protocol(format!("malformed status line {line:?}"));

    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/") {
        return Err(malformed());
    }
    let code = parts.next().ok_or_else(malformed)?;
    code.parse::<u16>()
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ok_response_head() {
        let head = ResponseHead::parse(
            b"HTTP/1.1 200 OK\r\n\
              Content-Type: text/plain\r\n\
              Content-Length: 5\r\n\
              Last-Modified: Mon, 02 Jan 2023 10:00:00 GMT\r\n\r\n",
        )
        .unwrap();

        assert_eq!(head.status, StatusCode::OK);
        assert!(!head.is_not_modified());
        assert_eq!(head.content_length().unwrap(), Some(5));
        assert_eq!(head.last_modified(), Some("Mon, 02 Jan 2023 10:00:00 GMT"));
        assert_eq!(head.headers.get("content-type").unwrap(), "text/plain");
    }

    #[test]
    fn detects_not_modified() {
        let head = ResponseHead::parse(b"HTTP/1.1 304 Not Modified\r\nDate: x\r\n\r\n").unwrap();
        assert!(head.is_not_modified());
        assert_eq!(head.content_length().unwrap(), None);
    }

    #[test]
    fn header_names_are_case_insensitive_and_first_wins() {
        let head = ResponseHead::parse(
            b"HTTP/1.0 200 OK\r\n\
              content-length: 3\r\n\
              CONTENT-LENGTH: 9\r\n\
              last-modified: Wed, 21 Oct 2015 07:28:00 GMT\r\n\
              Last-Modified: Mon, 02 Jan 2023 10:00:00 GMT\r\n\r\n",
        )
        .unwrap();
        assert_eq!(head.content_length().unwrap(), Some(3));
        assert_eq!(head.last_modified(), Some("Wed, 21 Oct 2015 07:28:00 GMT"));
    }

    #[test]
    fn bad_content_length_is_protocol_error() {
        let head = ResponseHead::parse(b"HTTP/1.1 200 OK\r\nContent-Length: lots\r\n\r\n").unwrap();
        assert!(head.content_length().unwrap_err().is_protocol());

        let head = ResponseHead::parse(b"HTTP/1.1 200 OK\r\nContent-Length: -1\r\n\r\n").unwrap();
        assert!(head.content_length().unwrap_err().is_protocol());
    }

    #[test]
    fn malformed_status_lines_rejected() {
        for block in [
            &b"garbage\r\n\r\n"[..],
            b"HTTP/1.1\r\n\r\n",
            b"HTTP/1.1 abc OK\r\n\r\n",
            b"HTTP/1.1 42 Odd\r\n\r\n",
            b"\xff\xfe\r\n\r\n",
        ] {
            assert!(ResponseHead::parse(block).unwrap_err().is_protocol());
        }
    }

    #[test]
    fn reason_phrase_is_optional() {
        let head = ResponseHead::parse(b"HTTP/1.1 404\r\n\r\n").unwrap();
        assert_eq!(head.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn non_text_header_value_does_not_fail_the_head() {
        let head = ResponseHead::parse(
            b"HTTP/1.1 200 OK\r\n\
              X-Title: caf\xe9\r\n\
              Content-Length: 2\r\n\
              Last-Modified: Mon, 02 Jan 2023 10:00:00 GMT\r\n\r\n",
        )
        .unwrap();

        assert_eq!(head.content_length().unwrap(), Some(2));
        assert_eq!(head.last_modified(), Some("Mon, 02 Jan 2023 10:00:00 GMT"));
        assert_eq!(head.headers.get("x-title").unwrap().as_bytes(), b"caf\xe9");
    }
}
