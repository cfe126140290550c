//! Feed fetching and entry normalization.
//!
//! One pass over the registry, strictly sequential: one region after another,
//! one source after another, one blocking fetch at a time. Failures are
//! isolated per source — a dead feed is logged and skipped, its siblings are
//! unaffected — and never abort the run.
//!
//! Normalization turns a raw [`feed_rs::model::Entry`] into a [`NewsItem`]
//! with every field guaranteed present: missing titles and links become
//! literal placeholders, a missing publication time falls back to the current
//! UTC instant, and the body is selected by priority (content block of type
//! text/html or text/plain, else summary, else placeholder) and passed
//! through the HTML sanitizer.

use crate::config::Config;
use crate::models::{NewsItem, NewsSnapshot, RegionNews, SourceResult};
use crate::sanitize::strip_html;
use chrono::{DateTime, Utc};
use feed_rs::model::{Entry, Feed};
use feed_rs::parser;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};

/// Placeholder for entries without a title.
pub const NO_TITLE: &str = "无标题";
/// Placeholder for entries without a link.
pub const NO_LINK: &str = "无链接";
/// Placeholder body for entries with no summary or content.
pub const NO_CONTENT: &str = "此新闻没有摘要或完整内容。";

/// Fetch every registered source and assemble the run's snapshot.
///
/// Every region appears in the result, in registry order. A source appears
/// only if its feed was fetched, parsed, and contained at least one entry.
#[instrument(level = "info", skip_all)]
pub async fn fetch_all(client: &Client, config: &Config) -> NewsSnapshot {
    let mut regions = Vec::with_capacity(config.regions.len());

    for region in &config.regions {
        let mut sources = Vec::new();
        for source in &region.sources {
            info!(
                region = %region.name,
                source = %source.name,
                limit = source.max_items,
                "Fetching feed"
            );
            match fetch_feed(client, &source.url).await {
                Ok(feed) => {
                    if feed.entries.is_empty() {
                        info!(source = %source.name, url = %source.url, "Feed has no entries; skipping source");
                        continue;
                    }
                    let items = collect_items(&feed.entries, source.max_items);
                    info!(source = %source.name, count = items.len(), "Collected items");
                    sources.push(SourceResult {
                        name: source.name.clone(),
                        items,
                    });
                }
                Err(e) => {
                    error!(
                        source = %source.name,
                        url = %source.url,
                        error = %e,
                        "Failed to fetch or parse feed; skipping source"
                    );
                }
            }
        }
        regions.push(RegionNews {
            region: region.name.clone(),
            sources,
        });
    }

    NewsSnapshot { regions }
}

/// Retrieve one feed URL and parse it.
///
/// Non-success HTTP statuses and parse failures both surface as errors; the
/// caller treats either as a source-level skip.
#[instrument(level = "debug", skip_all, fields(%url))]
async fn fetch_feed(client: &Client, url: &str) -> Result<Feed, Box<dyn Error>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("feed fetch failed with status {status}").into());
    }
    let bytes = response.bytes().await?;
    debug!(bytes = bytes.len(), "Fetched feed body");
    let feed = parser::parse(bytes.as_ref())?;
    Ok(feed)
}

/// Normalize the first `limit` entries, in feed order.
///
/// Feeds are assumed to already be reverse-chronological; no re-sorting.
/// Each entry is stamped at its own processing moment, so date-less entries
/// within one feed get individual fallback timestamps.
pub fn collect_items(entries: &[Entry], limit: usize) -> Vec<NewsItem> {
    entries
        .iter()
        .take(limit)
        .map(|entry| build_item(entry, Utc::now()))
        .collect()
}

/// Build one [`NewsItem`] from a raw entry. Infallible: every missing field
/// has a defined fallback.
pub fn build_item(entry: &Entry, now: DateTime<Utc>) -> NewsItem {
    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let link = select_link(entry).unwrap_or_else(|| NO_LINK.to_string());

    let published = match entry.published {
        Some(published) => published.with_timezone(&Utc),
        None => {
            warn!(%title, "Entry has no publication date; using current UTC time");
            now
        }
    };

    let raw = select_content(entry);
    let mut content = match raw {
        Some(raw) => strip_html(&raw),
        None => {
            debug!(%title, "Entry has no summary or content; using placeholder");
            NO_CONTENT.to_string()
        }
    };
    // Sanitizing can eat the whole body (e.g. an image-only summary); the
    // non-empty invariant wins.
    if content.trim().is_empty() {
        content = NO_CONTENT.to_string();
    }

    NewsItem {
        title,
        link,
        published,
        content,
    }
}

/// Pick the entry's primary link: the first `alternate` (or rel-less) link,
/// else the first non-empty href.
fn select_link(entry: &Entry) -> Option<String> {
    entry
        .links
        .iter()
        .find(|l| {
            l.rel
                .as_deref()
                .is_none_or(|rel| rel.eq_ignore_ascii_case("alternate"))
        })
        .or_else(|| entry.links.first())
        .map(|l| l.href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// Select the raw body text for an entry.
///
/// Priority: a content block of media type text/html or text/plain, then the
/// summary. feed-rs folds RSS `<description>` into the summary field, so the
/// original description tier is covered there.
fn select_content(entry: &Entry) -> Option<String> {
    if let Some(content) = &entry.content {
        if let Some(body) = &content.body {
            let media_type = content.content_type.to_string();
            if !body.trim().is_empty()
                && (media_type.starts_with("text/html") || media_type.starts_with("text/plain"))
            {
                return Some(body.clone());
            }
        }
    }
    entry
        .summary
        .as_ref()
        .map(|t| t.content.clone())
        .filter(|s| !s.trim().is_empty())
}
