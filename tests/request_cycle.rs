use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};
use signed_cookie_jar::cookies::{CookieOptions, Signer};
use signed_cookie_jar::transport::{CookieSink, HeaderMapSink, RequestCookies};
use signed_cookie_jar::{CookieConfig, CookieError, CookieJar};

const NOW: i64 = 1_445_412_480;

fn config() -> CookieConfig {
    CookieConfig::with_key("s3cr3t").unwrap()
}

/// Turns the `Set-Cookie` headers of one response into the `Cookie` header of
/// the next request, dropping attributes and deleted cookies.
fn next_request(response: &HeaderMap) -> HeaderMap {
    let pairs: Vec<_> = response
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().unwrap().split("; ").next())
        .filter(|pair| !pair.ends_with('='))
        .collect();

    let mut headers = HeaderMap::new();
    if !pairs.is_empty() {
        headers.insert(COOKIE, HeaderValue::from_str(&pairs.join("; ")).unwrap());
    }
    headers
}

#[test]
fn worked_example_round_trips() {
    let signer = Signer::new("s3cr3t");
    let signed = signer.sign("favorite", "Laravel");
    assert_eq!(signed.len(), 40 + 1 + "Laravel".len());
    assert_eq!(&signed[40..], "~Laravel");

    let incoming = RequestCookies::parse(&format!("favorite={signed}"));
    let jar = CookieJar::new(config(), incoming).unwrap();
    assert_eq!(jar.get("favorite").as_deref(), Some("Laravel"));
}

#[test]
fn values_survive_a_full_request_cycle() {
    // Request 1: set cookies.
    let mut jar = CookieJar::from_headers(config(), &HeaderMap::new()).unwrap();
    jar.put("favorite", "Laravel", 20);
    jar.forever("theme", "dark mode; high contrast");
    jar.put_with("admin", "yes", 0, CookieOptions::default().path("/admin").secure(true));

    let mut sink = HeaderMapSink::new();
    assert!(jar.send_at(&mut sink, NOW).unwrap());
    sink.commit();

    let set_cookies: Vec<_> = sink
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(set_cookies.len(), 3);
    assert!(set_cookies[0].starts_with("favorite="));
    assert!(set_cookies[0].contains("; Expires=Wed, 21 Oct 2015 07:48:00 GMT"));
    assert!(set_cookies[0].contains("; Path=/"));
    assert!(set_cookies[1].contains("dark%20mode%3B%20high%20contrast"));
    assert!(set_cookies[2].contains("; Path=/admin"));
    assert!(set_cookies[2].contains("; Secure"));

    // Request 2: read them back.
    let request = next_request(sink.headers());
    let jar = CookieJar::from_headers(config(), &request).unwrap();
    assert_eq!(jar.get("favorite").as_deref(), Some("Laravel"));
    assert_eq!(jar.get("theme").as_deref(), Some("dark mode; high contrast"));
    assert_eq!(jar.get("admin").as_deref(), Some("yes"));
    assert!(jar.is_empty());
}

#[test]
fn forget_emits_expired_empty_cookie() {
    let mut jar = CookieJar::new(config(), RequestCookies::new()).unwrap();
    jar.forget("favorite");

    let mut sink = HeaderMapSink::new();
    jar.send_at(&mut sink, NOW).unwrap();

    let header = sink.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    // NOW - 2000 minutes
    assert!(header.starts_with("favorite=;"), "{header}");
    assert!(header.contains("; Expires=Sun, 19 Oct 2015 22:08:00 GMT"), "{header}");
    assert!(header.contains("; Path=/"), "{header}");
}

#[test]
fn cookie_signed_with_another_key_is_ignored() {
    let foreign = Signer::new("other-key").sign("favorite", "Laravel");
    let mut request = HeaderMap::new();
    request.insert(COOKIE, HeaderValue::from_str(&format!("favorite={foreign}")).unwrap());

    let jar = CookieJar::from_headers(config(), &request).unwrap();
    assert!(!jar.has("favorite"));
    assert_eq!(jar.get_or("favorite", "fallback").as_deref(), Some("fallback"));
}

#[test]
fn committed_sink_refuses_flush() {
    let mut jar = CookieJar::new(config(), RequestCookies::new()).unwrap();
    jar.put("a", "1", 0);

    let mut sink = HeaderMapSink::new();
    sink.commit();
    assert!(sink.headers_sent());
    assert!(!jar.send(&mut sink).unwrap());
    assert!(sink.headers().is_empty());
}

#[test]
fn oversized_cookie_fails_flush_without_emitting() {
    let mut jar = CookieJar::new(config(), RequestCookies::new()).unwrap();
    jar.put("a", "1", 0);
    jar.put("b", "x".repeat(5000), 0);

    let mut sink = HeaderMapSink::new();
    let err = jar.send(&mut sink).unwrap_err();
    assert!(matches!(err, CookieError::PayloadTooLarge { ref name, .. } if name == "b"));
    assert!(err.to_string().contains("Payload too large"));
    assert!(sink.headers().is_empty());
}

#[test]
fn malformed_cookie_fails_flush_without_emitting() {
    let mut jar = CookieJar::new(config(), RequestCookies::new()).unwrap();
    jar.put("ok", "1", 0);
    jar.put_with("session", "1", 0, CookieOptions::default().path("/\r\nX-Injected: 1"));

    let mut sink = HeaderMapSink::new();
    let err = jar.send_at(&mut sink, NOW).unwrap_err();
    assert!(matches!(err, CookieError::InvalidHeader { ref name, .. } if name == "session"));
    assert!(sink.headers().is_empty());
}
