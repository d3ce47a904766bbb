//! Cookies: [`CookieJar`], [`Signer`] and the entry types they share.

mod cookies;
mod cookie_jar;
mod signer;

pub use cookies::CookieDefault;
pub use cookies::CookieEntry;
pub use cookies::CookieOptions;

pub use cookie_jar::CookieJar;

pub use signer::Signer;
pub use signer::SEPARATOR;
pub use signer::SIGNATURE_LEN;
