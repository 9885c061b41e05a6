//! Host resolution for TCP connections

use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

/// Resolve hostname to socket addresses synchronously.
///
/// IP literals skip the resolver entirely.
///
/// # Examples
/// ```rust
/// use urlcache_client::connect::tcp::dns::resolve_host_sync;
///
/// let ip_addrs = resolve_host_sync("127.0.0.1", 8080)?;
/// assert_eq!(ip_addrs.len(), 1);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn resolve_host_sync(host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    if let Ok(ip) = IpAddr::from_str(host) {
        return Ok(vec![SocketAddr::new(ip, port)]);
    }

    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
    if addrs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("No addresses resolved for {host}"),
        ));
    }
    Ok(addrs)
}
