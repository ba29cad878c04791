// src/crawl/coordinator.rs
// =============================================================================
// Seeds the frontier, runs the worker pool, and shuts it down cleanly.
//
// Lifecycle of one crawl:
// 1. Reject an invalid root (empty result, no threads, no fetches)
// 2. Create the frontier and admit the root
// 3. Spawn `worker_count` named worker threads
// 4. Sleep until the frontier is drained (nothing pending, nothing in flight)
// 5. Push exactly `worker_count` sentinels: one per worker
// 6. Join every worker and return the visited set
// =============================================================================

use super::worker::{self, WorkerContext};
use super::{Address, CrawlerOptions, Frontier, Scope};
use crate::error::CrawlError;
use crate::fetch::LinkFetcher;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

// What a finished crawl hands back
#[derive(Debug)]
pub struct CrawlReport {
    pub root: Address,
    /// Every valid, in-scope address admitted during the run, root included
    pub visited: HashSet<Address>,
    /// Worker threads that exited normally
    pub workers_joined: usize,
    /// Pages handed to the fetch capability
    pub pages_processed: usize,
    pub duration: Duration,
}

impl CrawlReport {
    fn empty(root: Address) -> Self {
        Self {
            root,
            visited: HashSet::new(),
            workers_joined: 0,
            pages_processed: 0,
            duration: Duration::ZERO,
        }
    }

    pub fn sorted_addresses(&self) -> Vec<&Address> {
        let mut addresses: Vec<&Address> = self.visited.iter().collect();
        addresses.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        addresses
    }
}

pub struct Coordinator {
    options: CrawlerOptions,
    fetcher: Arc<dyn LinkFetcher>,
}

impl Coordinator {
    pub fn new(options: CrawlerOptions, fetcher: Arc<dyn LinkFetcher>) -> Self {
        Self { options, fetcher }
    }

    // Runs the crawl to completion
    //
    // Blocks the calling thread. Only fails if a worker thread cannot be
    // spawned; a bad root is an empty report, not an error.
    pub fn crawl(&self) -> Result<CrawlReport, CrawlError> {
        let root = self.options.root.clone();
        if !root.is_valid() {
            tracing::error!(url = %root, "root address is not a valid http(s) URL, nothing to crawl");
            return Ok(CrawlReport::empty(root));
        }

        let worker_count = self.options.worker_count.get();
        let scope = Arc::new(Scope::new(self.options.scope_rule, &root));
        tracing::info!(
            url = %root,
            scope = scope.key().unwrap_or_default(),
            workers = worker_count,
            "starting crawl"
        );

        let started = Instant::now();
        let frontier = Arc::new(Frontier::new());
        frontier.try_admit(root.clone());

        let handles = spawn_pool(&frontier, worker_count, |id| {
            self.spawn_worker(id, &frontier, &scope)
        })?;

        frontier.wait_drained();
        tracing::info!(
            visited = frontier.visited_len(),
            "no work left, terminating workers"
        );

        frontier.push_sentinels(worker_count);
        let workers_joined = join_workers(handles);

        let report = CrawlReport {
            root,
            visited: frontier.snapshot_visited(),
            workers_joined,
            pages_processed: frontier.processed(),
            duration: started.elapsed(),
        };
        tracing::info!(
            visited = report.visited.len(),
            pages = report.pages_processed,
            workers = report.workers_joined,
            elapsed_ms = report.duration.as_millis() as u64,
            "crawl complete"
        );
        Ok(report)
    }

    fn spawn_worker(
        &self,
        id: usize,
        frontier: &Arc<Frontier>,
        scope: &Arc<Scope>,
    ) -> std::io::Result<JoinHandle<usize>> {
        let frontier = Arc::clone(frontier);
        let scope = Arc::clone(scope);
        let fetcher = Arc::clone(&self.fetcher);
        let skip_links_found = self.options.skip_links_found;

        thread::Builder::new()
            .name(format!("crawler-{}", id))
            .spawn(move || {
                worker::run(&WorkerContext {
                    id,
                    frontier: &frontier,
                    fetcher: fetcher.as_ref(),
                    scope: &scope,
                    skip_links_found,
                })
            })
    }
}

// Spawns `worker_count` workers with `spawn`
//
// If worker `k` fails to start, workers 0..k already hold the frontier, so
// they get one sentinel each and are joined before the error is returned.
fn spawn_pool<F>(
    frontier: &Frontier,
    worker_count: usize,
    mut spawn: F,
) -> Result<Vec<JoinHandle<usize>>, CrawlError>
where
    F: FnMut(usize) -> std::io::Result<JoinHandle<usize>>,
{
    let mut handles = Vec::with_capacity(worker_count);
    for id in 0..worker_count {
        match spawn(id) {
            Ok(handle) => handles.push(handle),
            Err(source) => {
                tracing::error!(worker = id, error = %source, "failed to spawn worker, stopping crawl");
                frontier.push_sentinels(handles.len());
                join_workers(handles);
                return Err(CrawlError::Spawn { id, source });
            }
        }
    }
    Ok(handles)
}

// Joins every handle; returns how many exited without panicking
fn join_workers(handles: Vec<JoinHandle<usize>>) -> usize {
    let mut joined = 0;
    for (id, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(pages) => {
                tracing::debug!(worker = id, pages, "worker joined");
                joined += 1;
            }
            Err(_) => tracing::error!(worker = id, "worker thread panicked"),
        }
    }
    joined
}
