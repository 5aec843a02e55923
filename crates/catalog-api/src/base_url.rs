//! Per-request public base URL.
//!
//! Self-links must point at the host the caller used. Behind a proxy that is
//! `X-Forwarded-Host`/`X-Forwarded-Proto`; otherwise the `Host` header; and
//! the configured public URL when neither is usable.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use catalog_products::domain::links::BaseUrl;

use crate::state::AppState;

/// The caller's public base URL, resolved once per request.
#[derive(Debug, Clone)]
pub struct RequestBaseUrl(pub BaseUrl);

impl FromRequestParts<AppState> for RequestBaseUrl {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_base_url(&parts.headers, &state.public_base_url)))
    }
}

/// First non-empty, comma-separated value of a header.
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Resolve the base URL for a request from its headers, falling back to
/// `fallback`. Never modifies `fallback`.
#[must_use]
pub fn resolve_base_url(headers: &HeaderMap, fallback: &BaseUrl) -> BaseUrl {
    let Some(host) =
        first_value(headers, "x-forwarded-host").or_else(|| first_value(headers, "host"))
    else {
        return fallback.clone();
    };
    let scheme = first_value(headers, "x-forwarded-proto").unwrap_or_else(|| fallback.scheme());

    BaseUrl::from_parts(scheme, host).unwrap_or_else(|_| fallback.clone())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn fallback() -> BaseUrl {
        BaseUrl::parse("https://api.example.com").unwrap()
    }

    #[test]
    fn test_no_host_headers_uses_fallback() {
        let headers = HeaderMap::new();

        assert_eq!(resolve_base_url(&headers, &fallback()), fallback());
    }

    #[test]
    fn test_host_header_keeps_fallback_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("localhost:3000"));

        let base = resolve_base_url(&headers, &fallback());

        assert_eq!(base.as_str(), "https://localhost:3000");
    }

    #[test]
    fn test_forwarded_headers_take_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("10.0.0.5:3000"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("shop.example.com, proxy.internal"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("http"));

        let base = resolve_base_url(&headers, &fallback());

        assert_eq!(base.as_str(), "http://shop.example.com");
    }

    #[test]
    fn test_unusable_forwarded_proto_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-host", HeaderValue::from_static("shop.example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("gopher"));

        assert_eq!(resolve_base_url(&headers, &fallback()), fallback());
    }

    #[test]
    fn test_forwarded_host_with_path_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-host", HeaderValue::from_static("evil.example/phish"));

        assert_eq!(resolve_base_url(&headers, &fallback()), fallback());
    }

    #[test]
    fn test_forwarded_host_with_user_info_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-host", HeaderValue::from_static("user@evil.example"));

        assert_eq!(resolve_base_url(&headers, &fallback()), fallback());
    }

    #[test]
    fn test_host_with_extra_colons_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("a:b:c"));

        assert_eq!(resolve_base_url(&headers, &fallback()), fallback());
    }

    #[test]
    fn test_host_with_backslash_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("evil.example\\phish"));

        assert_eq!(resolve_base_url(&headers, &fallback()), fallback());
    }

    #[test]
    fn test_ipv6_host_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("[::1]:3000"));

        assert_eq!(resolve_base_url(&headers, &fallback()).as_str(), "https://[::1]:3000");
    }
}
