//! Signed cookies for a web application layer.
//!
//! Writes are buffered in a per-request [`CookieJar`](cookies::CookieJar) and
//! flushed to the response in one go; every value is sent as
//! `<sha1 hex>~<value>` and checked again when the client sends it back, so a
//! modified cookie reads as absent.

pub mod config;
pub mod cookies;
pub mod errors;
pub mod transport;

pub use config::CookieConfig;
pub use cookies::CookieJar;
pub use errors::CookieError;
