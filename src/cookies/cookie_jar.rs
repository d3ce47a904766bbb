//! Per-request cookie jar.
//!
//! A [`CookieJar`] buffers every cookie write made while handling one request
//! and only talks to the transport when [`send`](CookieJar::send) is called.
//! Reads go through the jar first (values staged by this process are trusted
//! as-is) and then fall back to the signed cookies the client sent, which are
//! verified before use.
//!
//! ## Notes
//! - At most one pending entry exists per name; later writes replace earlier
//!   ones in place, so flush order is the order names were first written.
//! - Incoming cookies are never copied into the jar.
//! - A flush does not drain the jar.
//! - The jar is not internally synchronized. It is meant to be owned by the
//!   request context and passed around as `&mut CookieJar`.
//!
//! ```rust
//! use signed_cookie_jar::config::CookieConfig;
//! use signed_cookie_jar::cookies::CookieJar;
//! use signed_cookie_jar::transport::{MemorySink, RequestCookies};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CookieConfig::with_key("s3cr3t")?;
//! let mut jar = CookieJar::new(config, RequestCookies::new())?;
//!
//! jar.put("favorite", "Laravel", 20);
//! assert_eq!(jar.get("favorite").as_deref(), Some("Laravel"));
//!
//! let mut sink = MemorySink::new();
//! assert!(jar.send(&mut sink)?);
//! assert!(sink.cookies[0].value.ends_with("~Laravel"));
//! # Ok(()) }
//! ```

use http::HeaderMap;
use time::OffsetDateTime;

use crate::config::{validate, CookieConfig};
use crate::cookies::{CookieDefault, CookieEntry, CookieOptions, Signer};
use crate::errors::CookieError;
use crate::transport::{CookieSink, OutgoingCookie, RequestCookies};

/// Where a read was answered from.
enum Resolved<'a> {
    /// Staged in the jar. `None` is a pending deletion.
    Pending(Option<&'a str>),
    /// Incoming cookie whose signature checked out.
    Verified(&'a str),
    Missing,
}

#[derive(Debug, Clone)]
pub struct CookieJar {
    config: CookieConfig,
    signer: Signer,
    incoming: RequestCookies,
    entries: Vec<CookieEntry>,
}

impl CookieJar {
    /// Creates an empty jar reading from `incoming`.
    pub fn new(config: CookieConfig, incoming: RequestCookies) -> Result<Self, CookieError> {
        validate(&config)?;
        let signer = Signer::from_config(&config);
        Ok(Self {
            config,
            signer,
            incoming,
            entries: Vec::new(),
        })
    }

    /// Creates an empty jar reading the `Cookie` headers of a request.
    pub fn from_headers(config: CookieConfig, headers: &HeaderMap) -> Result<Self, CookieError> {
        Self::new(config, RequestCookies::from_headers(headers))
    }

    pub fn config(&self) -> &CookieConfig {
        &self.config
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn incoming(&self) -> &RequestCookies {
        &self.incoming
    }

    /// Default options for this jar (configured path, host-only, not secure).
    pub fn options(&self) -> CookieOptions {
        CookieOptions::default().path(self.config.default_path.clone())
    }

    // ---------- Write path ----------

    /// Stages a cookie that lives for `minutes` (`0` for a session cookie).
    pub fn put<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V, minutes: i64) {
        let options = self.options();
        self.put_with(name, value, minutes, options);
    }

    pub fn put_with<N: Into<String>, V: Into<String>>(
        &mut self,
        name: N,
        value: V,
        minutes: i64,
        options: CookieOptions,
    ) {
        self.insert(CookieEntry::new(name, Some(value.into()), minutes, options));
    }

    /// Stages a cookie that lasts one year.
    pub fn forever<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        let options = self.options();
        self.forever_with(name, value, options);
    }

    pub fn forever_with<N: Into<String>, V: Into<String>>(
        &mut self,
        name: N,
        value: V,
        options: CookieOptions,
    ) {
        let minutes = self.config.forever_minutes;
        self.put_with(name, value, minutes, options);
    }

    /// Stages the deletion of a cookie: no value and an expiry in the past.
    pub fn forget<N: Into<String>>(&mut self, name: N) {
        let options = self.options();
        self.forget_with(name, options);
    }

    pub fn forget_with<N: Into<String>>(&mut self, name: N, options: CookieOptions) {
        let minutes = self.config.forget_minutes;
        self.insert(CookieEntry::new(name, None, minutes, options));
    }

    fn insert(&mut self, entry: CookieEntry) {
        log::debug!("Cookie {:?} staged (lifetime {} min)", entry.name, entry.lifetime_minutes);

        // Replace existing cookie with same name
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == entry.name) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
    }

    // ---------- Read path ----------

    fn resolve(&self, name: &str) -> Resolved<'_> {
        if let Some(entry) = self.entry(name) {
            return Resolved::Pending(entry.value.as_deref());
        }

        let Some(raw) = self.incoming.get(name) else {
            return Resolved::Missing;
        };

        match self.signer.verify(name, raw) {
            Some(value) => Resolved::Verified(value),
            None => {
                log::warn!("Cookie {:?}: signature check failed, ignoring", name);
                Resolved::Missing
            }
        }
    }

    /// Returns the value for `name`, or `None` when it is neither staged nor
    /// present with a valid signature.
    pub fn get(&self, name: &str) -> Option<String> {
        self.get_or(name, CookieDefault::None)
    }

    /// Like [`get`](Self::get), falling back to `default` on a miss.
    ///
    /// A staged deletion is not a miss: it yields `None` and `default` is
    /// never evaluated.
    pub fn get_or<'d, D: Into<CookieDefault<'d>>>(&self, name: &str, default: D) -> Option<String> {
        match self.resolve(name) {
            Resolved::Pending(value) => value.map(str::to_owned),
            Resolved::Verified(value) => Some(value.to_owned()),
            Resolved::Missing => default.into().resolve(),
        }
    }

    /// Like [`get`](Self::get), computing the fallback only on a miss.
    pub fn get_or_else<F: FnOnce() -> String>(&self, name: &str, f: F) -> Option<String> {
        self.get_or(name, CookieDefault::lazy(|| Some(f())))
    }

    /// Returns `true` if `get(name)` resolves a value.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    // ---------- Inspection ----------

    pub fn entry(&self, name: &str) -> Option<&CookieEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Pending entries in flush order.
    pub fn entries(&self) -> &[CookieEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty JSON snapshot of the pending entries.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }

    // ---------- Flush ----------

    /// Emits every pending entry into `sink`, timed against the current clock.
    ///
    /// Returns `Ok(false)` without emitting anything if the sink has already
    /// sent its headers.
    pub fn send<S: CookieSink + ?Sized>(&self, sink: &mut S) -> Result<bool, CookieError> {
        self.send_at(sink, OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Same as [`send`](Self::send) with an explicit Unix time.
    ///
    /// Every entry is signed, size-checked and validated before the first one
    /// is emitted. When one is too large or cannot be written as a
    /// `Set-Cookie` header, the flush fails and the sink receives nothing.
    pub fn send_at<S: CookieSink + ?Sized>(&self, sink: &mut S, now: i64) -> Result<bool, CookieError> {
        if sink.headers_sent() {
            log::warn!("Headers already sent, {} cookie(s) not flushed", self.entries.len());
            return Ok(false);
        }

        let outgoing = self
            .entries
            .iter()
            .map(|entry| self.prepare(entry, now))
            .collect::<Result<Vec<_>, _>>()?;

        for cookie in outgoing {
            log::debug!("Cookie {:?} sent (expires {})", cookie.name, cookie.expires);
            sink.set_cookie(cookie)?;
        }

        Ok(true)
    }

    fn prepare(&self, entry: &CookieEntry, now: i64) -> Result<OutgoingCookie, CookieError> {
        // Deletions are sent with an empty value.
        let value = match &entry.value {
            Some(value) => self.signer.sign(&entry.name, value),
            None => String::new(),
        };

        let limit = self.config.max_payload_bytes;
        if value.len() > limit {
            log::error!("Cookie {:?}: signed payload is {} bytes, limit is {}", entry.name, value.len(), limit);
            return Err(CookieError::PayloadTooLarge {
                name: entry.name.clone(),
                size: value.len(),
                limit,
            });
        }

        let cookie = OutgoingCookie {
            name: entry.name.clone(),
            value,
            expires: entry.expires_at(now),
            path: entry.path.clone(),
            domain: entry.domain.clone(),
            secure: entry.secure,
        };
        if let Err(e) = cookie.validate() {
            log::error!("Cookie {:?} cannot be sent: {}", entry.name, e);
            return Err(e);
        }
        Ok(cookie)
    }
}
