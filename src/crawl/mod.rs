// src/crawl/mod.rs
// =============================================================================
// This module handles crawling a single subdomain with a pool of threads.
//
// Submodules:
// - address:     normalized URL value type (+ the termination sentinel)
// - scope:       which hosts belong to the crawl
// - frontier:    shared deduplicating work queue with drain detection
// - worker:      the per-thread fetch/admit loop
// - coordinator: seeds the frontier, runs the pool, shuts it down
// - options:     flags for one crawl run
//
// Every page reachable from the root (and inside the scope) is fetched
// exactly once, no matter how many workers run.
// =============================================================================

mod address;
mod coordinator;
mod frontier;
mod options;
mod scope;
mod worker;

pub use address::Address;
pub use coordinator::{Coordinator, CrawlReport};
pub use frontier::Frontier;
pub use options::CrawlerOptions;
pub use scope::{Scope, ScopeRule};
