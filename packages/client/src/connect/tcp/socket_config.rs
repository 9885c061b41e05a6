//! TCP socket configuration

use std::io;
use std::net::TcpStream;
use std::time::Duration;

/// Apply read/write timeouts and `TCP_NODELAY` to a connected stream.
///
/// The request is written in one piece, so Nagle buffering only adds latency.
pub fn configure_tcp_socket(
    stream: &TcpStream,
    read_timeout: Duration,
    write_timeout: Duration,
) -> io::Result<()> {
    stream.set_nodelay(true)?;
    stream.set_read_timeout(Some(read_timeout))?;
    stream.set_write_timeout(Some(write_timeout))?;
    Ok(())
}
