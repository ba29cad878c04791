// src/fetch/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to resolve relative links (/docs, ../other)
// against the address of the page they were found on.
// =============================================================================

use crate::crawl::Address;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

// Extracts all links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base: the URL of the page (for resolving relative links)
//
// Returns: the set of absolute addresses found, fragments stripped.
// Links that cannot be resolved are dropped; links that resolve to a
// non-http scheme come back as invalid addresses and are filtered later.
//
// Example:
//   html = "<a href='/docs#intro'>Docs</a>"
//   base = "https://example.com/guide"
//   result = {"https://example.com/docs"}
pub fn extract_links(html: &str, base: &Url) -> HashSet<Address> {
    let mut links = HashSet::new();
    if html.is_empty() {
        return links;
    }

    let document = Html::parse_document(html);
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve_link(base, href) {
            Some(url) => {
                links.insert(Address::from_url(url));
            }
            None => tracing::debug!(href, page = %base, "skipping unresolvable link"),
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"              -> Some("https://example.com/docs")
//   href = "https://other.com"  -> Some("https://other.com/")
//   href = "#section"           -> None (same page)
//   href = "mailto:a@b.com"     -> None
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    // Skip anchors and special protocols
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    // join() handles both cases: absolute hrefs replace the base entirely,
    // relative ones are resolved against it
    base.join(href).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/guide/page").unwrap()
    }

    #[test]
    fn test_extracts_absolute_and_relative_links() {
        let html = r#"
            <html><body>
                <a href="https://other.com">Other</a>
                <a href="/docs#intro">Docs</a>
                <a href="../about">About</a>
                <a href="next">Next</a>
            </body></html>
        "#;

        let links = extract_links(html, &base());
        let expected: HashSet<Address> = [
            "https://other.com/",
            "https://example.com/docs",
            "https://example.com/about",
            "https://example.com/guide/next",
        ]
        .into_iter()
        .map(Address::parse)
        .collect();

        assert_eq!(links, expected);
    }

    #[test]
    fn test_duplicate_links_collapse() {
        let html = r#"<a href="/a">1</a><a href="/a#x">2</a><a href="https://example.com/a">3</a>"#;
        assert_eq!(extract_links(html, &base()).len(), 1);
    }

    #[test]
    fn test_skips_anchors_and_special_protocols() {
        let html = r##"
            <a href="#top">Top</a>
            <a href="mailto:test@example.com">Mail</a>
            <a href="tel:+123">Call</a>
            <a href="javascript:void(0)">JS</a>
            <a href="">Empty</a>
        "##;
        assert!(extract_links(html, &base()).is_empty());
    }

    #[test]
    fn test_malformed_href_does_not_stop_other_links() {
        let html = r#"<a href="http://[broken">Bad</a><a href="/good">Good</a>"#;
        let links = extract_links(html, &base());
        assert!(links.contains(&Address::parse("https://example.com/good")));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        assert!(extract_links("<a name='x'>No link</a>", &base()).is_empty());
    }

    #[test]
    fn test_empty_page() {
        assert!(extract_links("", &base()).is_empty());
    }
}
