//! Data models for the in-memory news snapshot.
//!
//! One run produces one [`NewsSnapshot`]: region → sources → items, in
//! registry order. The snapshot is built once by the fetcher, rendered once
//! per output variant, and discarded at exit — nothing survives across runs.

use chrono::{DateTime, SecondsFormat, Utc};

/// A single normalized feed entry.
///
/// Invariants: `content` is never empty (the fetcher substitutes a placeholder
/// when a feed entry carries no usable body) and `published` always holds a
/// valid UTC instant (falling back to fetch time when the feed omits one).
#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub published: DateTime<Utc>,
    /// Plain text, already passed through the HTML sanitizer.
    pub content: String,
}

impl NewsItem {
    /// Publication time as ISO-8601 UTC with second precision,
    /// e.g. `2025-06-10T08:30:00+00:00`.
    pub fn published_str(&self) -> String {
        self.published.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

/// The items collected from one source.
///
/// A `SourceResult` only exists for sources whose feed was fetched, parsed,
/// and contained at least one entry; sources that errored or came back empty
/// are absent from the snapshot entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceResult {
    pub name: String,
    pub items: Vec<NewsItem>,
}

/// One region with the results of its sources, in registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionNews {
    pub region: String,
    pub sources: Vec<SourceResult>,
}

/// The complete result of one fetch pass. Every registered region appears
/// here, even when none of its sources yielded anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsSnapshot {
    pub regions: Vec<RegionNews>,
}

impl NewsSnapshot {
    /// Flattened item count across all regions and sources. Digest generation
    /// is skipped when this is zero.
    pub fn total_items(&self) -> usize {
        self.regions
            .iter()
            .flat_map(|r| &r.sources)
            .map(|s| s.items.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            link: "https://example.com/a".to_string(),
            published: Utc.with_ymd_and_hms(2025, 6, 10, 8, 30, 0).unwrap(),
            content: "body".to_string(),
        }
    }

    #[test]
    fn test_published_str_is_iso8601_utc_seconds() {
        assert_eq!(item("t").published_str(), "2025-06-10T08:30:00+00:00");
    }

    #[test]
    fn test_total_items_counts_across_regions() {
        let snapshot = NewsSnapshot {
            regions: vec![
                RegionNews {
                    region: "中国".to_string(),
                    sources: vec![
                        SourceResult {
                            name: "新华社".to_string(),
                            items: vec![item("a"), item("b")],
                        },
                        SourceResult {
                            name: "第一财经".to_string(),
                            items: vec![],
                        },
                    ],
                },
                RegionNews {
                    region: "日本".to_string(),
                    sources: vec![SourceResult {
                        name: "NHK".to_string(),
                        items: vec![item("c")],
                    }],
                },
            ],
        };
        assert_eq!(snapshot.total_items(), 3);
    }

    #[test]
    fn test_empty_snapshot_has_zero_items() {
        let snapshot = NewsSnapshot {
            regions: vec![RegionNews {
                region: "欧美".to_string(),
                sources: vec![],
            }],
        };
        assert_eq!(snapshot.total_items(), 0);
        assert_eq!(NewsSnapshot::default().total_items(), 0);
    }
}
