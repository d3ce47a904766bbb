//! Cookie value signing.
//!
//! A signed cookie value has the shape `<digest>~<value>`, where `<digest>` is
//! the lowercase hex SHA-1 of `name ++ value ++ key`. The digest authenticates
//! the value; it does not hide it.
//!
//! Verification splits on the **first** `~` and requires the prefix to be
//! exactly [`SIGNATURE_LEN`] bytes long before recomputing the digest. Values
//! that carry their own `~` characters are fine, since only the first one
//! separates the digest from the payload.
//!
//! ```rust
//! use signed_cookie_jar::cookies::Signer;
//!
//! let signer = Signer::new("s3cr3t");
//! let signed = signer.sign("favorite", "Laravel");
//! assert!(signed.ends_with("~Laravel"));
//! assert_eq!(signer.verify("favorite", &signed), Some("Laravel"));
//! ```

use std::fmt;
use std::sync::Arc;

use sha1::{Digest, Sha1};
use subtle::ConstantTimeEq;

use crate::config::CookieConfig;

/// Separator between the digest and the payload.
pub const SEPARATOR: char = '~';

/// Length of the hex digest in bytes (SHA-1 is 160 bits, 40 hex chars).
pub const SIGNATURE_LEN: usize = 40;

/// Signs and verifies cookie values with the application key.
///
/// Cloning is cheap; the key is shared.
#[derive(Clone)]
pub struct Signer {
    key: Arc<str>,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").field("key", &"<redacted>").finish()
    }
}

impl Signer {
    pub fn new<S: AsRef<str>>(key: S) -> Self {
        Self { key: Arc::from(key.as_ref()) }
    }

    pub fn from_config(config: &CookieConfig) -> Self {
        Self::new(&config.key)
    }

    /// Returns the hex digest of `name ++ value ++ key`.
    pub fn hash(&self, name: &str, value: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(name.as_bytes());
        hasher.update(value.as_bytes());
        hasher.update(self.key.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Returns the wire form `<digest>~<value>`.
    pub fn sign(&self, name: &str, value: &str) -> String {
        let mut signed = self.hash(name, value);
        signed.reserve(1 + value.len());
        signed.push(SEPARATOR);
        signed.push_str(value);
        signed
    }

    /// Returns the payload of `signed` if its digest matches, `None` otherwise.
    ///
    /// Malformed input (no separator, digest of the wrong length) is treated
    /// the same as a digest mismatch.
    pub fn verify<'a>(&self, name: &str, signed: &'a str) -> Option<&'a str> {
        let (hash, payload) = signed.split_once(SEPARATOR)?;
        if hash.len() != SIGNATURE_LEN {
            return None;
        }

        let expected = self.hash(name, payload);
        if bool::from(expected.as_bytes().ct_eq(hash.as_bytes())) {
            Some(payload)
        } else {
            None
        }
    }
}
