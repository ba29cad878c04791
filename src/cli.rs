// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the struct below IS the CLI definition, and each
// field becomes an argument or flag.
//
// Example:
//   subcrawl https://monzo.com --thread-count 8 --skip-links-found
// =============================================================================

use crate::crawl::{Address, CrawlerOptions, ScopeRule};
use clap::Parser;
use std::num::NonZeroUsize;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "subcrawl",
    version,
    about = "Crawl every page of a single subdomain with a pool of worker threads",
    long_about = "subcrawl starts from a URL, follows every link that stays on the same host, \
                  and prints the set of pages it found. Each page is fetched exactly once. \
                  Set RUST_LOG (e.g. RUST_LOG=subcrawl=debug) to control log output."
)]
pub struct Cli {
    /// URL to start from; its host limits the crawl
    pub base_url: String,

    /// Number of worker threads fetching pages concurrently
    #[arg(short = 't', long, default_value = "1")]
    pub thread_count: NonZeroUsize,

    /// Don't list the links found on each page in the log
    #[arg(long)]
    pub skip_links_found: bool,

    /// How discovered hosts are matched against the base URL's host
    ///
    /// host:   exact hostname match (default)
    /// prefix: only the first hostname label has to match
    #[arg(long, value_enum, default_value_t = ScopeRule::Host)]
    pub scope: ScopeRule,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Output results in JSON format instead of a list
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn crawler_options(&self) -> CrawlerOptions {
        CrawlerOptions::new(Address::parse(&self.base_url))
            .with_worker_count(self.thread_count)
            .with_skip_links_found(self.skip_links_found)
            .with_scope_rule(self.scope)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
