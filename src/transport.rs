//! Transport seams: incoming request cookies and outgoing `Set-Cookie` writes.
//!
//! The jar never talks HTTP itself. It reads raw incoming values from a
//! [`RequestCookies`] map and hands finished [`OutgoingCookie`]s to a
//! [`CookieSink`]. Two sinks are provided:
//! - [`HeaderMapSink`] appends `Set-Cookie` headers to an `http::HeaderMap`.
//! - [`MemorySink`] only records what was emitted (handy in tests).
//!
//! Header serialization and parsing go through the `cookie` crate with
//! percent-encoding, so a value containing `;` or spaces survives the round
//! trip through real headers unchanged.

mod request;
mod response;

pub use request::RequestCookies;
pub use response::CookieSink;
pub use response::HeaderMapSink;
pub use response::MemorySink;
pub use response::OutgoingCookie;
