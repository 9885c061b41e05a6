//! TCP connection utilities
//!
//! Host resolution, per-address connect with timeout, and socket
//! configuration for the single blocking exchange a fetch performs.

pub mod connection;
pub mod dns;
pub mod socket_config;

pub use connection::{connect_to_address_list, open_connection};
pub use dns::resolve_host_sync;
pub use socket_config::configure_tcp_socket;
