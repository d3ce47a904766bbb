use cookie::Cookie;
use http::header::SET_COOKIE;
use http::{HeaderMap, HeaderValue};
use time::OffsetDateTime;

use crate::errors::CookieError;

/// A cookie ready to leave the process: value already signed, expiry resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingCookie {
    pub name: String,
    /// Signed value (`<digest>~<value>`), empty for a deletion.
    pub value: String,
    /// Unix timestamp, `0` for a session cookie.
    pub expires: i64,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
}

impl OutgoingCookie {
    /// Checks that the cookie can be written as a single well-formed
    /// `Set-Cookie` header.
    ///
    /// The name must be an RFC 6265 token. `Path` and `Domain` may only hold
    /// visible ASCII and spaces, without `;`. A non-zero expiry must be a
    /// representable date.
    pub fn validate(&self) -> Result<(), CookieError> {
        if self.name.is_empty() || !self.name.bytes().all(is_token_byte) {
            return Err(self.invalid("name is not a valid cookie token"));
        }
        if !self.path.bytes().all(is_attribute_byte) {
            return Err(self.invalid("path contains a control character or ';'"));
        }
        if let Some(domain) = &self.domain {
            if !domain.bytes().all(is_attribute_byte) {
                return Err(self.invalid("domain contains a control character or ';'"));
            }
        }
        if self.expires != 0 && OffsetDateTime::from_unix_timestamp(self.expires).is_err() {
            return Err(self.invalid("expiry is out of range"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> CookieError {
        CookieError::InvalidHeader {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }

    /// Builds the equivalent [`cookie::Cookie`].
    ///
    /// `Expires` is set for every cookie with a non-zero, representable expiry.
    pub fn to_cookie(&self) -> Cookie<'static> {
        let mut builder = Cookie::build((self.name.clone(), self.value.clone()))
            .path(self.path.clone())
            .secure(self.secure);

        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        if self.expires != 0 {
            if let Ok(expires) = OffsetDateTime::from_unix_timestamp(self.expires) {
                builder = builder.expires(expires);
            }
        }

        builder.build()
    }

    /// Serializes this cookie as a percent-encoded `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        self.to_cookie().encoded().to_string()
    }
}

/// `token` from RFC 2616 section 2.2, as required for cookie names.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
}

fn is_attribute_byte(b: u8) -> bool {
    (b == b' ' || b.is_ascii_graphic()) && b != b';'
}

/// Receiving end of a flush.
pub trait CookieSink {
    /// Returns `true` once response headers are committed. A jar will not
    /// flush into a sink in that state.
    fn headers_sent(&self) -> bool;

    /// Emits a single cookie.
    fn set_cookie(&mut self, cookie: OutgoingCookie) -> Result<(), CookieError>;
}

/// Writes cookies as `Set-Cookie` headers into an [`HeaderMap`].
///
/// Call [`commit`](Self::commit) when the response headers go out; any later
/// flush is refused.
#[derive(Debug, Default)]
pub struct HeaderMapSink {
    headers: HeaderMap,
    committed: bool,
}

impl HeaderMapSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing header map, keeping its headers.
    pub fn with_headers(headers: HeaderMap) -> Self {
        Self { headers, committed: false }
    }

    pub fn commit(&mut self) {
        self.committed = true;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }
}

impl CookieSink for HeaderMapSink {
    fn headers_sent(&self) -> bool {
        self.committed
    }

    fn set_cookie(&mut self, cookie: OutgoingCookie) -> Result<(), CookieError> {
        let value = HeaderValue::from_str(&cookie.to_header_value()).map_err(|e| {
            CookieError::InvalidHeader {
                name: cookie.name.clone(),
                reason: e.to_string(),
            }
        })?;
        self.headers.append(SET_COOKIE, value);
        Ok(())
    }
}

/// Records emitted cookies in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub cookies: Vec<OutgoingCookie>,
    pub headers_sent: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&OutgoingCookie> {
        self.cookies.iter().find(|c| c.name == name)
    }
}

impl CookieSink for MemorySink {
    fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    fn set_cookie(&mut self, cookie: OutgoingCookie) -> Result<(), CookieError> {
        self.cookies.push(cookie);
        Ok(())
    }
}
