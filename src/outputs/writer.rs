//! Digest file persistence.
//!
//! One file per output target per calendar day. Reruns on the same day
//! overwrite the existing file rather than appending, so the digest is
//! idempotent within a day.

use chrono::{DateTime, Utc};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Fixed filename prefix; the full name is `daily-news-summary-YYYYMMDD.md`.
pub const FILENAME_PREFIX: &str = "daily-news-summary";

/// Write a rendered digest into `directory`, creating intermediate
/// directories as needed. Returns the path of the written file.
#[instrument(level = "info", skip_all, fields(%directory))]
pub async fn write_digest(
    markdown: &str,
    directory: &str,
    now: DateTime<Utc>,
) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(directory).await?;
    let filename = format!("{FILENAME_PREFIX}-{}.md", now.format("%Y%m%d"));
    let path = Path::new(directory).join(filename);
    fs::write(&path, markdown).await?;
    info!(path = %path.display(), bytes = markdown.len(), "Wrote digest file");
    Ok(path)
}
