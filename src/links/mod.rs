//! URL classification for magic-link paste.
//!
//! `is_probable_url` decides whether a plain-text clipboard payload should
//! turn the current selection into a hyperlink instead of replacing it. The
//! predicate is total and pure: it never panics and has no side effects.

use std::net::Ipv4Addr;

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    // Anchored URL shape: optional http/https/ftp scheme, optional www.,
    // either a dotted domain ending in a TLD-like suffix or a numeric IPv4
    // host, optional port, optional path/query/fragment. Hardcoded and
    // syntactically valid; a parse failure is a compile-time bug.
    static ref URL_PATTERN: Regex = Regex::new(
        r"(?ix)
        ^
        (?:(?:https?|ftp)://)?
        (?:
            (?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}
          | \d{1,3}(?:\.\d{1,3}){3}
        )
        (?::\d{1,5})?
        (?:[/?\#]\S*)?
        $
    ",
    )
    .expect("BUG: hardcoded URL pattern is invalid - this is a compile-time bug");

    // Scheme prefix of an already-qualified link.
    static ref SCHEME_PATTERN: Regex = Regex::new(r"(?i)^[a-z][a-z0-9+.-]*://")
        .expect("BUG: hardcoded scheme pattern is invalid - this is a compile-time bug");
}

/// True when `text` looks like a URL worth linking to.
///
/// Accepts scheme-optional bare domains (`example.com`), `www.` forms, full
/// `http(s)://` and `ftp://` URLs, and public numeric IPv4 hosts with optional
/// port and path. Rejects anything containing whitespace and IPv4 hosts in
/// private, loopback, link-local, or unspecified ranges.
#[must_use]
pub fn is_probable_url(text: &str) -> bool {
    let candidate = text.trim();
    if candidate.is_empty() || candidate.chars().any(char::is_whitespace) {
        return false;
    }
    if !URL_PATTERN.is_match(candidate) {
        return false;
    }
    // Scheme-qualified candidates also have to parse as an absolute URL.
    if SCHEME_PATTERN.is_match(candidate) && Url::parse(candidate).is_err() {
        return false;
    }
    let host = host_of(candidate);
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        // Numeric hosts must be real public addresses; a dotted quad with an
        // out-of-range octet is not a URL.
        return match host.parse::<Ipv4Addr>() {
            Ok(ip) => {
                !(ip.is_private() || ip.is_loopback() || ip.is_link_local() || ip.is_unspecified())
            }
            Err(_) => false,
        };
    }
    // Non-numeric host: the pattern already vetted the domain shape.
    true
}

/// Prefix `https://` when `link` carries no scheme; never rewrites one.
#[must_use]
pub fn ensure_scheme(link: &str) -> String {
    let link = link.trim();
    if SCHEME_PATTERN.is_match(link) {
        link.to_string()
    } else {
        format!("https://{link}")
    }
}

/// Host portion of a matched candidate: scheme stripped, cut at the first
/// port/path/query/fragment delimiter.
fn host_of(candidate: &str) -> &str {
    let rest = match candidate.find("://") {
        Some(idx) => &candidate[idx + 3..],
        None => candidate,
    };
    let end = rest
        .find([':', '/', '?', '#'])
        .unwrap_or(rest.len());
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_url_shapes() {
        for text in [
            "example.com",
            "www.example.com",
            "http://example.com",
            "https://example.com/path?q=1#frag",
            "ftp://files.example.org",
            "sub.domain.example.co.uk",
            "example.com:8080/docs",
            "8.8.8.8",
            "https://93.184.216.34/index.html",
            "  example.com  ",
        ] {
            assert!(is_probable_url(text), "should accept {text:?}");
        }
    }

    #[test]
    fn rejects_non_urls() {
        for text in [
            "",
            "hello",
            "hello world",
            "example",
            "just some text with example.com inside",
            "http://",
            "example.c0m-",
            "foo.1",
        ] {
            assert!(!is_probable_url(text), "should reject {text:?}");
        }
    }

    #[test]
    fn rejects_private_and_loopback_hosts() {
        for text in [
            "127.0.0.1",
            "http://127.0.0.1:8080",
            "10.0.0.5",
            "172.16.4.1/admin",
            "192.168.1.1",
            "169.254.0.10",
            "0.0.0.0",
        ] {
            assert!(!is_probable_url(text), "should reject {text:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_dotted_quads() {
        for text in [
            "999.999.999.999",
            "256.1.1.1",
            "http://300.300.300.300/x",
            "1.2.3.456",
        ] {
            assert!(!is_probable_url(text), "should reject {text:?}");
        }
    }

    #[test]
    fn ensure_scheme_only_prefixes_bare_links() {
        assert_eq!(ensure_scheme("example.com"), "https://example.com");
        assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
        assert_eq!(ensure_scheme("HTTPS://example.com"), "HTTPS://example.com");
        assert_eq!(ensure_scheme("ftp://example.com"), "ftp://example.com");
    }
}
