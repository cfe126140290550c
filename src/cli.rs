//! Command-line interface definitions.
//!
//! The digest is a run-to-completion batch job with no required arguments;
//! the only option is an alternative source registry.

use clap::Parser;

/// Command-line arguments for the daily news digest.
///
/// # Examples
///
/// ```sh
/// # Run with the built-in source registry
/// global_news_digest
///
/// # Run with a custom registry
/// global_news_digest -c sources.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file (source registry, output targets)
    #[arg(short, long)]
    pub config: Option<String>,
}
