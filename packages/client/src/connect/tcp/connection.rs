//! TCP connection establishment

use std::io;
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use super::dns::resolve_host_sync;
use super::socket_config::configure_tcp_socket;
use crate::config::CacheConfig;
use crate::error::{self, Result};
use crate::http::url::ParsedUrl;

/// Connect to the first reachable address.
///
/// Each address gets the full `timeout`. The error of the last attempt is
/// returned when every address fails.
pub fn connect_to_address_list(addrs: &[SocketAddr], timeout: Duration) -> io::Result<TcpStream> {
    let mut last_error = io::Error::new(io::ErrorKind::InvalidInput, "No addresses to connect to");

    for addr in addrs {
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!(
                    target: "urlcache::connect::tcp",
                    %addr,
                    error = %e,
                    "Failed to connect"
                );
                last_error = e;
            }
        }
    }

    Err(last_error)
}

/// Resolve `url`'s host and open a configured connection to it.
///
/// # Errors
///
/// Resolution, connect and socket option failures are network errors.
pub fn open_connection(url: &ParsedUrl, config: &CacheConfig) -> Result<TcpStream> {
    let origin = url.host_header();

    let addrs = resolve_host_sync(&url.host, url.port)
        .map_err(|e| error::network(e).with_url(origin.clone()))?;
    let stream = connect_to_address_list(&addrs, config.connect_timeout)
        .map_err(|e| error::network(e).with_url(origin.clone()))?;
    configure_tcp_socket(&stream, config.read_timeout, config.write_timeout)
        .map_err(|e| error::network(e).with_url(origin))?;

    tracing::debug!(
        target: "urlcache::connect::tcp",
        host = %url.host,
        port = url.port,
        "Connected"
    );

    Ok(stream)
}
