//! Markdown digest rendering.
//!
//! Converts one [`NewsSnapshot`] plus a generation instant into a Hugo
//! document: YAML front matter followed by nested region/source sections.
//! The instant is an explicit argument — rendering itself is pure, so
//! identical snapshot + variant + instant produce byte-identical output.

use crate::models::NewsSnapshot;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

/// Hugo front matter category label.
const CATEGORY: &str = "新闻整合";
/// Fixed front matter tags; the current `YYYYMMDD` date is appended at render.
const TAGS: [&str; 3] = ["每日", "新闻", "自动化"];
/// Quoted excerpts are cut to this many characters.
const EXCERPT_CHARS: usize = 500;

/// Render the digest for one output variant.
///
/// Variant 0 gets the Chinese title template; any other variant gets the
/// English one. The body is identical across variants: a `##` heading per
/// region with sources, a `###` heading per source with items, and one
/// bulleted line plus quoted excerpt per item.
pub fn render(snapshot: &NewsSnapshot, variant: usize, now: DateTime<Utc>) -> String {
    let display_date = now.format("%Y.%m.%d.");
    let title = if variant == 0 {
        format!("[{display_date} 全球新闻汇总]")
    } else {
        format!("[{display_date} Global News Roundup]")
    };

    let mut md = String::new();
    writeln!(md, "---").unwrap();
    writeln!(md, "title: \"{title}\"").unwrap();
    writeln!(md, "date: {}", now.to_rfc3339_opts(SecondsFormat::Secs, false)).unwrap();
    writeln!(md, "categories: [\"{CATEGORY}\"]").unwrap();
    let tags = TAGS
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(md, "tags: [{tags}, \"{}\"]", now.format("%Y%m%d")).unwrap();
    writeln!(md, "draft: false").unwrap();
    writeln!(md, "---").unwrap();

    for region in &snapshot.regions {
        if region.sources.is_empty() {
            continue;
        }
        writeln!(md, "## 国家/地区: {}\n", region.region).unwrap();
        for source in &region.sources {
            if source.items.is_empty() {
                continue;
            }
            writeln!(md, "### {}\n", source.name).unwrap();
            for item in &source.items {
                writeln!(
                    md,
                    "* **[{}]({})** - {}",
                    item.title,
                    item.link,
                    item.published_str()
                )
                .unwrap();
                writeln!(md, "  > {}\n", excerpt(&item.content)).unwrap();
            }
        }
    }

    md
}

/// Flatten newlines to spaces and cut to the first [`EXCERPT_CHARS`]
/// characters. The ellipsis is appended unconditionally, even when nothing
/// was cut.
fn excerpt(content: &str) -> String {
    let flat = content.replace('\n', " ");
    let mut out: String = flat.chars().take(EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}
