//! Cookie core types.
//!
//! [`CookieEntry`] is one pending write held by a [`CookieJar`](super::CookieJar).
//! It is serializable so the contents of a jar can be inspected (or
//! snapshotted to JSON) by application tests before anything is flushed.
//!
//! ```rust
//! use signed_cookie_jar::cookies::{CookieEntry, CookieOptions};
//!
//! let entry = CookieEntry::new("favorite", Some("Laravel".into()), 20, CookieOptions::default());
//! assert_eq!(entry.path, "/");
//! assert!(entry.domain.is_none());
//! assert!(!entry.is_session());
//! ```

use serde::{Deserialize, Serialize};

/// Optional attributes of a cookie write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieOptions {
    /// Path scoping, `"/"` unless configured otherwise.
    pub path: String,

    /// Domain scoping (host-only if `None`).
    pub domain: Option<String>,

    /// If `true`, the cookie is only sent over HTTPS.
    pub secure: bool,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            domain: None,
            secure: false,
        }
    }
}

impl CookieOptions {
    pub fn path<S: Into<String>>(mut self, path: S) -> Self {
        self.path = path.into();
        self
    }

    pub fn domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

/// A pending outbound cookie write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieEntry {
    /// Cookie name (case-sensitive). Unique within a jar.
    pub name: String,

    /// Unsigned value. `None` marks a deletion.
    pub value: Option<String>,

    /// Lifetime in minutes from flush time.
    ///
    /// `0` is a session cookie, negative values are already expired.
    pub lifetime_minutes: i64,

    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
}

impl CookieEntry {
    pub fn new<S: Into<String>>(
        name: S,
        value: Option<String>,
        lifetime_minutes: i64,
        options: CookieOptions,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            lifetime_minutes,
            path: options.path,
            domain: options.domain,
            secure: options.secure,
        }
    }

    /// Returns `true` if no explicit expiry is sent for this cookie.
    pub fn is_session(&self) -> bool {
        self.lifetime_minutes == 0
    }

    /// Unix timestamp the cookie expires at when flushed at `now`, or `0` for
    /// session cookies.
    pub fn expires_at(&self, now: i64) -> i64 {
        if self.is_session() {
            0
        } else {
            now.saturating_add(self.lifetime_minutes.saturating_mul(60))
        }
    }
}

/// Fallback for [`CookieJar::get_or`](super::CookieJar::get_or) when no valid
/// value is found.
///
/// The lazy variant only runs on the miss path.
pub enum CookieDefault<'a> {
    None,
    Value(String),
    Lazy(Box<dyn FnOnce() -> Option<String> + 'a>),
}

impl<'a> CookieDefault<'a> {
    pub fn lazy(f: impl FnOnce() -> Option<String> + 'a) -> Self {
        CookieDefault::Lazy(Box::new(f))
    }

    pub fn resolve(self) -> Option<String> {
        match self {
            CookieDefault::None => None,
            CookieDefault::Value(v) => Some(v),
            CookieDefault::Lazy(f) => f(),
        }
    }
}

impl std::fmt::Debug for CookieDefault<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CookieDefault::None => f.write_str("None"),
            CookieDefault::Value(v) => f.debug_tuple("Value").field(v).finish(),
            CookieDefault::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<&str> for CookieDefault<'_> {
    fn from(v: &str) -> Self {
        CookieDefault::Value(v.to_string())
    }
}

impl From<String> for CookieDefault<'_> {
    fn from(v: String) -> Self {
        CookieDefault::Value(v)
    }
}

impl From<Option<String>> for CookieDefault<'_> {
    fn from(v: Option<String>) -> Self {
        match v {
            Some(v) => CookieDefault::Value(v),
            None => CookieDefault::None,
        }
    }
}
