// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Run the crawl on a blocking thread (workers are plain OS threads)
// 4. Print the pages found, as a list or as JSON
// 5. Exit with proper code (0 = pages found, 1 = nothing crawled, 2 = error)
// =============================================================================

mod cli;
mod crawl;
mod error;
mod fetch;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use crawl::{Coordinator, CrawlReport};
use fetch::HttpFetcher;
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout stays clean for the results
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("subcrawl=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Returns:
//   Ok(0) = at least one page crawled
//   Ok(1) = nothing crawled (e.g. the base URL was invalid)
//   Err   = the crawl could not run
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let options = cli.crawler_options();

    let fetcher = HttpFetcher::new(tokio::runtime::Handle::current(), cli.request_timeout())
        .context("could not set up the HTTP client")?;
    let coordinator = Coordinator::new(options, Arc::new(fetcher));

    // The coordinator blocks until every worker has exited, so keep it off
    // the async worker threads
    let report = tokio::task::spawn_blocking(move || coordinator.crawl())
        .await
        .context("crawl thread panicked")??;

    print_report(&report, cli.json)?;

    if report.visited.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a crawl::Address,
    pages: usize,
    workers: usize,
    duration_ms: u64,
    urls: Vec<&'a crawl::Address>,
}

fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    let urls = report.sorted_addresses();

    if json {
        let output = JsonReport {
            root: &report.root,
            pages: report.pages_processed,
            workers: report.workers_joined,
            duration_ms: report.duration.as_millis() as u64,
            urls,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for url in &urls {
        println!("{}", url);
    }
    println!();
    println!("📊 Summary:");
    println!("   🌐 Root: {}", report.root);
    println!("   📄 Found {} URLs", urls.len());
    println!("   🧵 Workers: {}", report.workers_joined);
    println!("   ⏱️  Took {:.2}s", report.duration.as_secs_f64());
    Ok(())
}
