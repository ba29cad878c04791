// src/crawl/address.rs
// =============================================================================
// The Address value type: a normalized URL the crawler can compare and hash.
//
// Normalization rules:
// - Parse with the `url` crate (lowercases scheme/host, adds a trailing "/" to
//   bare origins, resolves dot segments)
// - Strip the #fragment, so "page#a" and "page#b" are the same address
// - Text that does not parse is kept as-is (minus the fragment) and marked
//   invalid, so a malformed href is simply filtered out later
//
// An address is "valid" when it has an http/https scheme and a host.
// The empty address is the termination sentinel and is never valid.
// =============================================================================

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

#[derive(Debug, Clone)]
pub struct Address {
    /// Canonical string form; the only field used for equality
    canonical: String,
    /// Lowercased hostname, if the address parsed and has one
    host: Option<String>,
    /// http/https scheme and a non-empty host
    valid: bool,
}

impl Address {
    // Parses raw text into an Address
    //
    // This never fails: unparseable input becomes an invalid address.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => Self::from_url(url),
            Err(_) => {
                let without_fragment = raw.split('#').next().unwrap_or_default();
                Self {
                    canonical: without_fragment.to_string(),
                    host: None,
                    valid: false,
                }
            }
        }
    }

    // Builds an Address from an already-parsed URL
    pub fn from_url(mut url: Url) -> Self {
        url.set_fragment(None);

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .map(|h| h.to_string());
        let valid = host.is_some() && matches!(url.scheme(), "http" | "https");

        Self {
            canonical: url.to_string(),
            host,
            valid,
        }
    }

    // The distinguished address that tells a worker to stop
    pub fn sentinel() -> Self {
        Self {
            canonical: String::new(),
            host: None,
            valid: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_sentinel(&self) -> bool {
        self.canonical.is_empty()
    }
}

// Equality and hashing only look at the canonical string.
// host/valid are derived from it, so they never disagree.
impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case("https://www.google.com/a/b", Some("www.google.com"))]
    #[case("https://monzo.com/x", Some("monzo.com"))]
    #[case("https://blog.monzo.com/", Some("blog.monzo.com"))]
    #[case("HTTPS://Blog.Monzo.COM/", Some("blog.monzo.com"))]
    #[case("monzo.com", None)]
    fn test_host(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(Address::parse(raw).host(), expected);
    }

    #[rstest]
    #[case("https://monzo.com/x", true)]
    #[case("http://127.0.0.1:8080/", true)]
    #[case("htx://blog.monzo.com/", false)]
    #[case("mailto:someone@monzo.com", false)]
    #[case("/relative/path", false)]
    #[case("", false)]
    fn test_validity(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(Address::parse(raw).is_valid(), expected);
    }

    #[rstest]
    #[case("https://www.google.com/a/b", "https://www.google.com/a/b", true)]
    #[case("https://www.google.com/a/b", "https://www.google.com/a/b#frag", true)]
    #[case("https://www.google.com/a/b#frag1", "https://www.google.com/a/b#frag2", true)]
    #[case("https://site.com", "https://site.com/", true)]
    #[case("https://www.google.com/a/b", "https://www.google.com/b/", false)]
    #[case("https://www.monzo.com/a/b", "https://www.google.com/a/b", false)]
    fn test_equality_dedups_in_sets(#[case] a: &str, #[case] b: &str, #[case] same: bool) {
        let set: HashSet<Address> = [Address::parse(a), Address::parse(b)].into_iter().collect();
        assert_eq!(set.len() == 1, same);
    }

    #[test]
    fn test_invalid_text_keeps_raw_form_without_fragment() {
        let address = Address::parse("not a url#section");
        assert_eq!(address.as_str(), "not a url");
        assert!(!address.is_valid());
    }

    #[test]
    fn test_sentinel() {
        let sentinel = Address::sentinel();
        assert!(sentinel.is_sentinel());
        assert!(!sentinel.is_valid());
        assert!(!Address::parse("https://monzo.com").is_sentinel());
    }

    #[test]
    fn test_serializes_as_canonical_string() {
        let json = serde_json::to_string(&Address::parse("https://site.com#top")).unwrap();
        assert_eq!(json, "\"https://site.com/\"");
    }
}
