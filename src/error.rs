// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// Most failures never become errors at all: a page that cannot be fetched
// just yields no links, and a bad seed yields an empty result. What is left
// here is the small set of things that stop a run from starting or finishing.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// The OS refused to start a worker thread
    #[error("failed to spawn worker {id}: {source}")]
    Spawn {
        id: usize,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be built (TLS backend, proxy settings, ...)
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Why a single page produced no links
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
}
