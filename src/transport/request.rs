use std::collections::HashMap;

use cookie::Cookie;
use http::header::COOKIE;
use http::HeaderMap;

/// Raw cookies sent by the client, keyed by name.
///
/// Values are kept as received, after percent-decoding. They are
/// still signed; verification is the jar's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCookies {
    values: HashMap<String, String>,
}

impl RequestCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a single `Cookie` header value: `"a=1; b=hello"`.
    pub fn parse(header_value: &str) -> Self {
        let mut cookies = Self::new();
        cookies.add_header(header_value);
        cookies
    }

    /// Collects every `Cookie` header found in `headers`.
    ///
    /// Headers that are not valid visible ASCII are skipped.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut cookies = Self::new();
        for header in headers.get_all(COOKIE) {
            match header.to_str() {
                Ok(header_str) => cookies.add_header(header_str),
                Err(_) => log::debug!("Skipping non-ASCII Cookie header"),
            }
        }
        cookies
    }

    fn add_header(&mut self, header_value: &str) {
        for parsed in Cookie::split_parse_encoded(header_value) {
            let cookie = match parsed {
                Ok(cookie) => cookie,
                Err(e) => {
                    log::debug!("Skipping malformed cookie pair: {}", e);
                    continue;
                }
            };

            // The first occurrence of a name wins, later duplicates are ignored.
            self.values
                .entry(cookie.name().to_string())
                .or_insert_with(|| cookie.value().to_string());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.values.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for RequestCookies {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestCookies {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
