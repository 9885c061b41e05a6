//! HTTP/1.1 transaction engine
//!
//! - `wire`: byte-exact framing of the header block and the body
//! - `transaction`: one request/response exchange over a byte stream

pub mod transaction;
pub mod wire;

pub use transaction::{Exchange, execute, exchange};
pub use wire::{HEADER_TERMINATOR, read_body, read_header_block};
