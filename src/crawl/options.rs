// src/crawl/options.rs
// =============================================================================
// Flags that control a single crawl run.
//
// Built from the command line in main.rs, but usable on its own:
//
//   let options = CrawlerOptions::new(Address::parse("https://site.com"))
//       .with_worker_count(NonZeroUsize::new(4).unwrap())
//       .with_skip_links_found(true);
// =============================================================================

use super::{Address, ScopeRule};
use std::num::NonZeroUsize;

#[derive(Debug, Clone)]
pub struct CrawlerOptions {
    /// Seed address; its host also defines the crawl scope
    pub root: Address,
    /// Number of worker threads (at least one)
    pub worker_count: NonZeroUsize,
    /// Leave the per-page list of discovered links out of the log
    pub skip_links_found: bool,
    /// How discovered hosts are compared against the root host
    pub scope_rule: ScopeRule,
}

impl CrawlerOptions {
    pub fn new(root: Address) -> Self {
        Self {
            root,
            worker_count: NonZeroUsize::MIN,
            skip_links_found: false,
            scope_rule: ScopeRule::default(),
        }
    }

    pub fn with_worker_count(mut self, worker_count: NonZeroUsize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_skip_links_found(mut self, skip_links_found: bool) -> Self {
        self.skip_links_found = skip_links_found;
        self
    }

    pub fn with_scope_rule(mut self, scope_rule: ScopeRule) -> Self {
        self.scope_rule = scope_rule;
        self
    }
}
