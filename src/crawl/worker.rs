// src/crawl/worker.rs
// =============================================================================
// The worker loop, run on each crawler thread.
//
// One iteration:
// 1. Claim the next address from the frontier (blocks while there is none)
// 2. If it is the sentinel, stop
// 3. Fetch the page and collect the links on it (failures = no links)
// 4. Admit every valid, in-scope link into the frontier
// 5. Report the address as processed
//
// Step 5 always comes after step 4: reporting first could let the frontier
// look drained while this page's links are still on their way in.
//
// A worker has no state of its own apart from its id, which is only used in
// log lines. Only the sentinel ends the loop; fetch errors never do.
// =============================================================================

use super::{Frontier, Scope};
use crate::fetch::LinkFetcher;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

// Outcome of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Processed { discovered: usize, admitted: usize },
    Terminated,
}

// A claimed page; reports it processed when dropped, including during a
// panic unwind, so a dying worker never leaves the frontier undrainable
struct Claim<'a> {
    frontier: &'a Frontier,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.frontier.mark_processed();
    }
}

// Everything a worker needs, borrowed from the coordinator
pub struct WorkerContext<'a> {
    pub id: usize,
    pub frontier: &'a Frontier,
    pub fetcher: &'a dyn LinkFetcher,
    pub scope: &'a Scope,
    pub skip_links_found: bool,
}

// Runs the loop until a sentinel arrives
//
// Returns: number of pages this worker processed
pub fn run(ctx: &WorkerContext<'_>) -> usize {
    tracing::debug!(worker = ctx.id, "worker started");

    let mut pages = 0;
    while let Step::Processed { .. } = crawl_next(ctx) {
        pages += 1;
    }

    tracing::debug!(worker = ctx.id, pages, "worker terminated");
    pages
}

// Performs exactly one iteration of the loop
pub fn crawl_next(ctx: &WorkerContext<'_>) -> Step {
    let address = ctx.frontier.next();
    if address.is_sentinel() {
        return Step::Terminated;
    }
    let claim = Claim {
        frontier: ctx.frontier,
    };

    // A panicking fetcher must not kill the worker: the page would stay
    // in flight forever and the crawl would never drain.
    let links = panic::catch_unwind(AssertUnwindSafe(|| ctx.fetcher.fetch(&address)))
        .unwrap_or_else(|_| {
            tracing::error!(worker = ctx.id, url = %address, "fetcher panicked, treating page as empty");
            HashSet::new()
        });

    if ctx.skip_links_found {
        tracing::info!(worker = ctx.id, url = %address, links = links.len(), "crawled page");
    } else {
        let found: Vec<&str> = links.iter().map(|link| link.as_str()).collect();
        tracing::info!(
            worker = ctx.id,
            url = %address,
            links = links.len(),
            "crawled page, found: [{}]",
            found.join(", ")
        );
    }

    let discovered = links.len();
    let mut admitted = 0;
    for link in links {
        if !ctx.scope.contains(&link) {
            tracing::debug!(worker = ctx.id, url = %link, "dropping out-of-scope link");
            continue;
        }
        if ctx.frontier.try_admit(link) {
            admitted += 1;
        }
    }

    drop(claim);
    Step::Processed {
        discovered,
        admitted,
    }
}
