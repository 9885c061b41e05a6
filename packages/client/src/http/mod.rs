//! HTTP/1.1 message vocabulary: URLs, conditional requests and response heads

pub mod request;
pub mod response;
pub mod url;

pub use request::ConditionalRequest;
pub use response::ResponseHead;
pub use url::{DEFAULT_PORT, ParsedUrl, UrlParseError};
