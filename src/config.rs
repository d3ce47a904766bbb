//! Cookie configuration.
//!
//! `CookieConfig` carries the signing key and the limits applied by a
//! [`CookieJar`](crate::cookies::CookieJar). The key is the application
//! secret; it is read once when the [`Signer`](crate::cookies::Signer) is
//! built and never changes afterwards.
//!
//! # Examples
//!
//! ```rust
//! use signed_cookie_jar::config::CookieConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = CookieConfig::builder()
//!     .key("s3cr3t")
//!     .max_payload_bytes(4000)
//!     .default_path("/app")
//!     .build()?; // returns Result<CookieConfig, CookieConfigError>
//! assert_eq!(cfg.forever_minutes, 525_600);
//! # Ok(()) }
//! ```
//!
//! # Fields (summary)
//! - `key`: Signing secret (required, non-empty).
//! - `max_payload_bytes`: Largest signed cookie value accepted at flush (default: 4000).
//! - `forever_minutes`: Lifetime used by `forever` (default: one year, 525600).
//! - `forget_minutes`: Lifetime used by `forget` (default: -2000, must be negative).
//! - `default_path`: Path attribute for cookies without explicit options (default: `/`).

use std::fmt;

pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 4000;
pub const FOREVER_MINUTES: i64 = 525_600;
pub const FORGET_MINUTES: i64 = -2000;

#[derive(Clone)]
pub struct CookieConfig {
    pub key: String,
    pub max_payload_bytes: usize,
    pub forever_minutes: i64,
    pub forget_minutes: i64,
    pub default_path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            forever_minutes: FOREVER_MINUTES,
            forget_minutes: FORGET_MINUTES,
            default_path: "/".to_string(),
        }
    }
}

// The key never shows up in logs or panics.
impl fmt::Debug for CookieConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieConfig")
            .field("key", &"<redacted>")
            .field("max_payload_bytes", &self.max_payload_bytes)
            .field("forever_minutes", &self.forever_minutes)
            .field("forget_minutes", &self.forget_minutes)
            .field("default_path", &self.default_path)
            .finish()
    }
}

impl CookieConfig {
    pub fn builder() -> CookieConfigBuilder {
        CookieConfigBuilder::default()
    }

    /// Shorthand for a config with every default except the key.
    pub fn with_key<S: Into<String>>(key: S) -> Result<Self, CookieConfigError> {
        Self::builder().key(key).build()
    }
}

/// Builder for [`CookieConfig`].
#[derive(Debug, Clone, Default)]
pub struct CookieConfigBuilder {
    inner: CookieConfig,
}

impl CookieConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut CookieConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn key<S: Into<String>>(self, key: S) -> Self { self.map(|c| c.key = key.into()) }
    pub fn max_payload_bytes(self, n: usize) -> Self { self.map(|c| c.max_payload_bytes = n) }
    pub fn forever_minutes(self, m: i64) -> Self { self.map(|c| c.forever_minutes = m) }
    pub fn forget_minutes(self, m: i64) -> Self { self.map(|c| c.forget_minutes = m) }
    pub fn default_path<S: Into<String>>(self, path: S) -> Self { self.map(|c| c.default_path = path.into()) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut CookieConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<CookieConfig, CookieConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieConfigError {
    EmptyKey,
    ZeroPayloadLimit,
    NonPositiveForeverLifetime(i64),
    NonNegativeForgetLifetime(i64),
}

impl fmt::Display for CookieConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieConfigError::EmptyKey =>
                write!(f, "signing key must not be empty"),
            CookieConfigError::ZeroPayloadLimit =>
                write!(f, "max_payload_bytes must be at least 1"),
            CookieConfigError::NonPositiveForeverLifetime(m) =>
                write!(f, "forever_minutes ({m}) must be positive"),
            CookieConfigError::NonNegativeForgetLifetime(m) =>
                write!(f, "forget_minutes ({m}) must be negative"),
        }
    }
}
impl std::error::Error for CookieConfigError {}

pub(crate) fn validate(c: &CookieConfig) -> Result<(), CookieConfigError> {
    if c.key.is_empty() {
        return Err(CookieConfigError::EmptyKey);
    }
    if c.max_payload_bytes == 0 {
        return Err(CookieConfigError::ZeroPayloadLimit);
    }
    if c.forever_minutes <= 0 {
        return Err(CookieConfigError::NonPositiveForeverLifetime(c.forever_minutes));
    }
    if c.forget_minutes >= 0 {
        return Err(CookieConfigError::NonNegativeForgetLifetime(c.forget_minutes));
    }
    Ok(())
}
