//! Blocking TCP connection establishment

pub mod tcp;

pub use tcp::{connect_to_address_list, open_connection, resolve_host_sync};
