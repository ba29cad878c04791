// src/fetch/mod.rs
// =============================================================================
// This module turns an address into the set of addresses its page links to.
//
// Submodules:
// - html: Extracts and resolves links from an HTML document
// - http: Downloads pages with reqwest and feeds them to the html extractor
//
// The crawler only ever talks to the LinkFetcher trait, so tests can swap in
// an in-memory "web" and the real crawl uses HttpFetcher.
// =============================================================================

mod html;
mod http;

use crate::crawl::Address;
use std::collections::HashSet;

pub use html::extract_links;
pub use http::HttpFetcher;

// The fetch capability used by every worker
//
// Contract:
// - Never fails: any network, protocol or status problem becomes an empty set
//   (implementations log the problem themselves)
// - Relative links are already resolved against the page address
// - Called concurrently from many worker threads, hence Send + Sync
pub trait LinkFetcher: Send + Sync {
    fn fetch(&self, address: &Address) -> HashSet<Address>;
}
