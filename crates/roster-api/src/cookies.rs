//! Cookie header helpers

use axum::http::{header, HeaderMap};
use cookie::{time::Duration, Cookie, SameSite};

/// Value of the named cookie from the request `Cookie` header.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .map(|c| c.trim())
        .find_map(|c| {
            c.strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
}

/// `Set-Cookie` value for an HttpOnly, SameSite=Lax cookie on `/`.
pub fn set_cookie(name: &str, value: &str, max_age_seconds: i64, secure: bool) -> String {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_seconds))
        .secure(secure)
        .build()
        .to_string()
}

pub fn clear_cookie(name: &str) -> String {
    set_cookie(name, "", 0, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; roster_session=abc123; other=1"),
        );
        assert_eq!(read_cookie(&headers, "roster_session"), Some("abc123"));
        assert_eq!(read_cookie(&headers, "roster"), None);
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn cookie_attributes() {
        let cookie = set_cookie("roster_session", "t", 60, true);
        assert!(cookie.starts_with("roster_session=t;"));
        for attribute in ["Path=/", "HttpOnly", "SameSite=Lax", "Max-Age=60", "Secure"] {
            assert!(cookie.contains(attribute), "{} missing from {}", attribute, cookie);
        }

        let plain = set_cookie("roster_session", "t", 60, false);
        assert!(!plain.contains("Secure"));

        let cleared = clear_cookie("roster_flash");
        assert!(cleared.starts_with("roster_flash=;"));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[test]
    fn issued_cookie_reads_back() {
        let mut headers = HeaderMap::new();
        let issued = set_cookie("roster_session", "0a1b2c", 3600, false);
        let pair = issued.split(';').next().unwrap().to_string();
        headers.insert(header::COOKIE, HeaderValue::from_str(&pair).unwrap());
        assert_eq!(read_cookie(&headers, "roster_session"), Some("0a1b2c"));
    }
}
