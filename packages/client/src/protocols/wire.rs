//! Response framing
//!
//! The header block is read up to and including the first `\r\n\r\n` and not
//! a byte further, so whatever follows stays buffered for the body read. Body
//! bytes are never interpreted as text.

use std::io::{BufRead, Read};

use memchr::memmem;

use crate::error::{self, ConnectionClosed, IncompleteMessage, Result};

/// Empty line ending the header block
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Read the header block, terminator included
///
/// Loops over `fill_buf` so short reads from the transport are handled. The
/// block may not grow past `limit` bytes.
///
/// # Errors
///
/// Returns a network error if reading fails (with a [`error::TimedOut`]
/// source when the read timeout elapsed) and a protocol error if the peer
/// closes the connection first or the block exceeds `limit`. A peer that
/// closes without sending anything yields a [`ConnectionClosed`] source.
pub fn read_header_block<R: BufRead>(reader: &mut R, limit: usize) -> Result<Vec<u8>> {
    let mut block = Vec::with_capacity(1024);

    loop {
        let available = reader.fill_buf().map_err(error::network_io)?;
        if available.is_empty() {
            if block.is_empty() {
                tracing::debug!(
                    target: "urlcache::protocols::wire",
                    "Connection closed before any response byte"
                );
                return Err(error::protocol(ConnectionClosed));
            }
            tracing::debug!(
                target: "urlcache::protocols::wire",
                received = block.len(),
                "Connection closed inside header block"
            );
            return Err(error::protocol(IncompleteMessage));
        }

        // The terminator may straddle the previous read.
        let scan_from = block.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
        let previous_len = block.len();
        let read_len = available.len();
        block.extend_from_slice(available);

        if let Some(pos) = memmem::find(&block[scan_from..], HEADER_TERMINATOR) {
            let end = scan_from + pos + HEADER_TERMINATOR.len();
            block.truncate(end);
            reader.consume(end - previous_len);
            return check_limit(block, limit);
        }

        reader.consume(read_len);
        if block.len() > limit {
            return check_limit(block, limit);
        }
    }
}

fn check_limit(block: Vec<u8>, limit: usize) -> Result<Vec<u8>> {
    if block.len() > limit {
        return Err(error::protocol(format!(
            "response header block exceeds {limit} bytes"
        )));
    }
    Ok(block)
}

/// Read exactly `length` body bytes
///
/// # Errors
///
/// Returns a network error if reading fails and a protocol error if the
/// stream ends before `length` bytes arrive.
pub fn read_body<R: Read>(reader: &mut R, length: u64) -> Result<Vec<u8>> {
    let mut body = Vec::with_capacity(usize::try_from(length.min(1 << 20)).unwrap_or(0));
    reader
        .take(length)
        .read_to_end(&mut body)
        .map_err(error::network_io)?;

    if (body.len() as u64) < length {
        tracing::debug!(
            target: "urlcache::protocols::wire",
            received = body.len(),
            expected = length,
            "Connection closed inside body"
        );
        return Err(error::protocol(IncompleteMessage));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor};

    use super::*;

    /// Reader that hands out at most `chunk` bytes per read.
    struct Trickle {
        data: Cursor<Vec<u8>>,
        chunk: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = buf.len().min(self.chunk);
            self.data.read(&mut buf[..n])
        }
    }

    fn trickle(data: &[u8], chunk: usize) -> BufReader<Trickle> {
        BufReader::new(Trickle {
            data: Cursor::new(data.to_vec()),
            chunk,
        })
    }

    const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\n\r\n\r\n\x00\xff";

    #[test]
    fn stops_exactly_at_terminator() {
        for chunk in [1, 2, 3, 5, 7, 1024] {
            let mut reader = trickle(RESPONSE, chunk);
            let block = read_header_block(&mut reader, 1024).unwrap();
            assert_eq!(block, b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\n\r\n");

            let body = read_body(&mut reader, 4).unwrap();
            assert_eq!(body, b"\r\n\x00\xff", "chunk size {chunk}");
        }
    }

    /// Reader whose every read fails with `kind`.
    struct Failing(std::io::ErrorKind);

    impl Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(self.0))
        }
    }

    fn source_is<T: std::error::Error + 'static>(err: &error::Error) -> bool {
        std::error::Error::source(err).is_some_and(|source| source.is::<T>())
    }

    #[test]
    fn early_eof_is_protocol_error() {
        let mut reader = trickle(b"HTTP/1.1 200 OK\r\nContent-Len", 4);
        let err = read_header_block(&mut reader, 1024).unwrap_err();
        assert!(err.is_protocol());
        assert!(source_is::<IncompleteMessage>(&err));
    }

    #[test]
    fn silent_close_is_connection_closed() {
        let mut reader = trickle(b"", 4);
        let err = read_header_block(&mut reader, 1024).unwrap_err();
        assert!(err.is_protocol());
        assert!(source_is::<ConnectionClosed>(&err));
    }

    #[test]
    fn read_timeouts_are_flagged() {
        for kind in [std::io::ErrorKind::TimedOut, std::io::ErrorKind::WouldBlock] {
            let mut reader = BufReader::new(Failing(kind));
            let err = read_header_block(&mut reader, 1024).unwrap_err();
            assert!(err.is_network());
            assert!(err.is_timeout());
            assert!(source_is::<error::TimedOut>(&err));

            let err = read_body(&mut Failing(kind), 4).unwrap_err();
            assert!(err.is_timeout());
        }

        let err = read_body(&mut Failing(std::io::ErrorKind::ConnectionReset), 4).unwrap_err();
        assert!(err.is_network());
        assert!(!err.is_timeout());
    }

    #[test]
    fn oversized_block_is_protocol_error() {
        let mut data = b"HTTP/1.1 200 OK\r\n".to_vec();
        data.extend(std::iter::repeat_n(b'a', 4096));
        data.extend_from_slice(b"\r\n\r\n");

        let mut reader = trickle(&data, 512);
        assert!(read_header_block(&mut reader, 1024).unwrap_err().is_protocol());

        let mut reader = trickle(&data, 8192);
        assert!(read_header_block(&mut reader, 1024).unwrap_err().is_protocol());
    }

    #[test]
    fn short_body_is_protocol_error() {
        let mut reader = Cursor::new(b"abc".to_vec());
        assert!(read_body(&mut reader, 5).unwrap_err().is_protocol());
    }

    #[test]
    fn zero_length_body_reads_nothing() {
        let mut reader = Cursor::new(b"next".to_vec());
        assert!(read_body(&mut reader, 0).unwrap().is_empty());
        assert_eq!(reader.position(), 0);
    }
}
