//! # Global News Digest
//!
//! A daily batch job that fetches news items from regional RSS/Atom feeds
//! (typically routes on a self-hosted RSSHub gateway), groups them by region
//! and source, and renders one Markdown digest per output variant for a Hugo
//! site.
//!
//! ## Usage
//!
//! ```sh
//! global_news_digest            # built-in source registry
//! global_news_digest -c my.yaml # custom registry and output targets
//! ```
//!
//! ## Architecture
//!
//! A thin, linear pipeline, executed once per invocation:
//! 1. **Fetch**: retrieve each registered feed sequentially and normalize
//!    its most recent entries into plain news items
//! 2. **Render**: produce one Markdown document per output variant from the
//!    same in-memory snapshot
//! 3. **Write**: persist each document to its target directory with a
//!    date-stamped filename (same-day reruns overwrite)
//!
//! Failures are isolated per source and per output target; the run itself
//! only fails on a broken configuration.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod fetcher;
mod models;
mod outputs;
mod sanitize;

use cli::Cli;
use outputs::{markdown, writer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news digest starting up");

    let args = Cli::parse();
    let config = config::load(args.config.as_deref())?;
    info!(
        regions = config.regions.len(),
        sources = config.source_count(),
        outputs = config.outputs.len(),
        "Configuration ready"
    );

    let client = reqwest::Client::builder()
        .user_agent(concat!("global_news_digest/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()?;

    // ---- Fetch one snapshot for the whole run ----
    let snapshot = fetcher::fetch_all(&client, &config).await;
    info!(items = snapshot.total_items(), "Snapshot assembled");

    if snapshot.total_items() == 0 {
        warn!("No news items collected; skipping digest generation");
        return Ok(());
    }

    // ---- Render and write one digest per output target ----
    let now = Utc::now();
    for target in &config.outputs {
        let document = markdown::render(&snapshot, target.variant, now);
        match writer::write_digest(&document, &target.directory, now).await {
            Ok(path) => info!(path = %path.display(), variant = target.variant, "Digest written"),
            Err(e) => error!(
                directory = %target.directory,
                variant = target.variant,
                error = %e,
                "Failed to write digest; continuing with remaining targets"
            ),
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Execution complete");
    Ok(())
}
