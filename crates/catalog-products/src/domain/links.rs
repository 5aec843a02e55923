//! Self-link construction.
//!
//! Links are absolute and built per request from the caller's public base
//! URL. Building a link never touches the base it was built from.

use std::fmt;

use thiserror::Error;

/// Endpoint under which sellers are addressable.
pub const SELLERS_ENDPOINT: &str = "/api/v1/sellers";

/// Rejected base URL input.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid base url '{input}': {reason}")]
pub struct InvalidBaseUrl {
    /// The rejected input.
    pub input: String,
    /// Why it was rejected.
    pub reason: &'static str,
}

/// The public scheme, host and optional path prefix of the service, as seen
/// by the caller. Stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Parse an absolute `http` or `https` URL with no query or fragment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` if the scheme is missing or not HTTP, the
    /// host is empty or malformed, or the input carries user info, a query,
    /// a fragment or whitespace.
    pub fn parse(input: &str) -> Result<Self, InvalidBaseUrl> {
        let reject = |reason| InvalidBaseUrl {
            input: input.to_owned(),
            reason,
        };

        let (scheme, rest) = input.split_once("://").ok_or_else(|| reject("missing scheme"))?;
        let scheme = scheme.to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(reject("scheme must be http or https"));
        }
        if rest.contains(['?', '#']) {
            return Err(reject("query and fragment are not allowed"));
        }
        if rest.chars().any(char::is_whitespace) {
            return Err(reject("whitespace is not allowed"));
        }

        let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
        if host.is_empty() {
            return Err(reject("missing host"));
        }
        check_authority(host).map_err(reject)?;
        let path = path.trim_end_matches('/');

        let normalized = if path.is_empty() {
            format!("{scheme}://{host}")
        } else {
            format!("{scheme}://{host}/{path}")
        };
        Ok(Self(normalized))
    }

    /// Build from a scheme and a host (optionally with port).
    ///
    /// `host` must be a bare authority: no path, user info or backslash.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` under the same rules as [`BaseUrl::parse`],
    /// or if `host` carries a path.
    pub fn from_parts(scheme: &str, host: &str) -> Result<Self, InvalidBaseUrl> {
        let input = format!("{scheme}://{host}");
        if host.contains('/') {
            return Err(InvalidBaseUrl {
                input,
                reason: "host must not carry a path",
            });
        }
        Self::parse(&input)
    }

    /// The normalized URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The lowercase scheme, `http` or `https`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.0.split_once("://").map_or("http", |(scheme, _)| scheme)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accepts `host`, `host:port`, `[v6]` and `[v6]:port`.
fn check_authority(authority: &str) -> Result<(), &'static str> {
    if authority.contains(['@', '\\']) {
        return Err("user info and backslashes are not allowed");
    }

    let port = if let Some(rest) = authority.strip_prefix('[') {
        let (literal, after) = rest.split_once(']').ok_or("unterminated IPv6 literal")?;
        let is_v6 = |c: char| c.is_ascii_hexdigit() || c == ':' || c == '.';
        if literal.is_empty() || !literal.chars().all(is_v6) {
            return Err("malformed IPv6 literal");
        }
        match after {
            "" => None,
            _ => Some(after.strip_prefix(':').ok_or("malformed port")?),
        }
    } else {
        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        };
        if host.is_empty() || host.contains(['[', ']']) {
            return Err("malformed host");
        }
        port
    };

    match port {
        Some(port) if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) => {
            Err("malformed port")
        }
        Some(port) if port.parse::<u16>().is_err() => Err("malformed port"),
        _ => Ok(()),
    }
}

/// Builds the absolute URL of one resource: `{base}{endpoint}/{id}`.
///
/// `endpoint` may be given with or without leading and trailing slashes.
#[must_use]
pub fn build_self_link(base: &BaseUrl, endpoint: &str, id: &str) -> String {
    let endpoint = endpoint.trim_matches('/');
    if endpoint.is_empty() {
        format!("{base}/{id}")
    } else {
        format!("{base}/{endpoint}/{id}")
    }
}
