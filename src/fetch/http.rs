// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP(S) and returns the links on them.
//
// Key functionality:
// - One shared reqwest Client (connection pooling across all workers)
// - Request timeout and a redirect limit
// - Non-success statuses, timeouts and transport errors are logged and turned
//   into "no links"; they never reach the worker
// - Non-HTML responses (PDFs, images, ...) are not parsed
//
// Workers are plain OS threads, while reqwest is async. Each fetch is driven
// to completion with Handle::block_on on the calling worker thread, so the
// worker blocks on its own page without holding any shared lock.
// =============================================================================

use super::{extract_links, LinkFetcher};
use crate::crawl::Address;
use crate::error::{CrawlError, FetchError};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use tokio::runtime::Handle;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 5;

pub struct HttpFetcher {
    client: Client,
    runtime: Handle,
}

impl HttpFetcher {
    // Creates a fetcher bound to a tokio runtime
    //
    // Parameters:
    //   runtime: handle of the runtime that drives the HTTP client
    //   timeout: per-request timeout (connect + body)
    //
    // fetch() must be called from threads that are NOT runtime workers
    // (the crawler's own OS threads), since it blocks on the handle.
    pub fn new(runtime: Handle, timeout: Duration) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, runtime })
    }

    // Fetches a web page and returns its HTML content
    //
    // Returns Ok(None) for successful responses that are not HTML.
    async fn fetch_page(&self, url: Url) -> Result<Option<(Url, String)>, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        if !is_html(response.headers().get(CONTENT_TYPE)) {
            return Ok(None);
        }

        // Relative links resolve against where we ended up after redirects
        let final_url = response.url().clone();
        let html = response.text().await?;
        Ok(Some((final_url, html)))
    }
}

impl LinkFetcher for HttpFetcher {
    fn fetch(&self, address: &Address) -> HashSet<Address> {
        let url = match Url::parse(address.as_str()) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(url = %address, error = %e, "cannot fetch malformed address");
                return HashSet::new();
            }
        };

        match self.runtime.block_on(self.fetch_page(url)) {
            Ok(Some((page_url, html))) => extract_links(&html, &page_url),
            Ok(None) => {
                tracing::debug!(url = %address, "skipping non-HTML response");
                HashSet::new()
            }
            Err(e) => {
                tracing::error!(url = %address, error = %e, "failed to fetch page");
                HashSet::new()
            }
        }
    }
}

// A missing Content-Type is treated as HTML
fn is_html(content_type: Option<&reqwest::header::HeaderValue>) -> bool {
    match content_type.and_then(|value| value.to_str().ok()) {
        Some(value) => value.to_ascii_lowercase().contains("html"),
        None => true,
    }
}
