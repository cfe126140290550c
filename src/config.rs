//! Run configuration: the source registry and output targets.
//!
//! The registry maps regions to ordered lists of feed sources. Ordering is
//! significant — regions and sources appear in the rendered digest in the
//! order they are declared here (or in the YAML file).
//!
//! By default the feeds are routes on a self-hosted [RSSHub](https://docs.rsshub.app)
//! gateway. Source URLs starting with `/` are resolved against
//! `rsshub_base_url`; absolute URLs are used as-is, so non-RSSHub feeds work
//! too.
//!
//! # YAML Example
//!
//! ```yaml
//! rsshub_base_url: "http://10.0.0.5:1200"
//! regions:
//!   - name: "中国"
//!     sources:
//!       - name: "新华社"
//!         url: "/news/xhsxw"
//!       - name: "央视新闻"
//!         url: "/cctv/news"
//!         max_items: 1
//! outputs:
//!   - directory: "content/Chinese/posts/news"
//!     variant: 0
//! ```

use serde::Deserialize;
use std::error::Error;
use std::fs;
use tracing::info;
use url::Url;

/// Default base URL of the self-hosted RSSHub instance.
pub const DEFAULT_RSSHUB_BASE_URL: &str = "http://127.0.0.1:1200";

/// Default number of entries fetched per source.
///
/// Individual sources may override this with an explicit `max_items` value
/// (e.g. `1` for a firehose feed that should only contribute its top story).
pub const DEFAULT_MAX_ITEMS: usize = 10;

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_rsshub_base_url() -> String {
    DEFAULT_RSSHUB_BASE_URL.to_string()
}

/// One feed source within a region.
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    /// Display name used for the `###` sub-heading in the digest.
    pub name: String,
    /// Feed URL, either absolute or an RSSHub route starting with `/`.
    pub url: String,
    /// How many of the most recent entries to keep from this feed.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

/// A region label with its ordered list of sources.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionFeeds {
    pub name: String,
    pub sources: Vec<Source>,
}

/// One rendered output flavor: a directory plus the title variant written there.
///
/// Variant 0 uses the Chinese title template; any other variant uses the
/// English one. The digest body is identical across variants.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputTarget {
    pub directory: String,
    #[serde(default)]
    pub variant: usize,
}

/// Complete run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_rsshub_base_url")]
    pub rsshub_base_url: String,
    #[serde(default)]
    pub regions: Vec<RegionFeeds>,
    #[serde(default)]
    pub outputs: Vec<OutputTarget>,
}

impl Default for Config {
    fn default() -> Self {
        let base = DEFAULT_RSSHUB_BASE_URL;
        let source = |name: &str, route: &str| Source {
            name: name.to_string(),
            url: format!("{base}{route}"),
            max_items: DEFAULT_MAX_ITEMS,
        };
        Config {
            rsshub_base_url: base.to_string(),
            regions: vec![
                RegionFeeds {
                    name: "中国".to_string(),
                    sources: vec![
                        source("新华社", "/news/xhsxw"),
                        source("第一财经", "/yicai/headline"),
                    ],
                },
                RegionFeeds {
                    name: "日本".to_string(),
                    sources: vec![source("NHK", "/nhk/news/zh")],
                },
                RegionFeeds {
                    name: "欧美".to_string(),
                    sources: vec![source("BBC", "/bbc/world-asia")],
                },
            ],
            outputs: vec![
                OutputTarget {
                    directory: "content/Chinese/posts/news".to_string(),
                    variant: 0,
                },
                OutputTarget {
                    directory: "content/English/posts/news".to_string(),
                    variant: 1,
                },
            ],
        }
    }
}

impl Config {
    /// Resolve RSSHub routes (`/news/xhsxw`) into absolute URLs against
    /// `rsshub_base_url`. Absolute source URLs are left untouched.
    pub fn resolve_source_urls(&mut self) -> Result<(), Box<dyn Error>> {
        let base = Url::parse(&self.rsshub_base_url)?;
        for region in &mut self.regions {
            for source in &mut region.sources {
                if source.url.starts_with('/') {
                    source.url = base.join(&source.url)?.to_string();
                }
            }
        }
        Ok(())
    }

    /// Total number of sources across all regions.
    pub fn source_count(&self) -> usize {
        self.regions.iter().map(|r| r.sources.len()).sum()
    }
}

/// Load configuration from a YAML file, or fall back to the built-in registry.
///
/// Config errors are the one fatal failure mode of the program: a run with a
/// broken registry has nothing useful to do.
pub fn load(path: Option<&str>) -> Result<Config, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let mut config: Config = serde_yaml::from_str(&text)?;
            config.resolve_source_urls()?;
            info!(path, sources = config.source_count(), "Loaded configuration file");
            Ok(config)
        }
        None => {
            let config = Config::default();
            info!(sources = config.source_count(), "Using built-in source registry");
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let config = Config::default();
        assert_eq!(config.regions.len(), 3);
        assert_eq!(config.source_count(), 4);
        assert_eq!(config.regions[0].name, "中国");
        assert_eq!(config.regions[0].sources[0].name, "新华社");
        assert_eq!(
            config.regions[0].sources[0].url,
            "http://127.0.0.1:1200/news/xhsxw"
        );
        assert_eq!(config.regions[2].sources[0].name, "BBC");
    }

    #[test]
    fn test_default_limits_and_outputs() {
        let config = Config::default();
        for region in &config.regions {
            for source in &region.sources {
                assert_eq!(source.max_items, DEFAULT_MAX_ITEMS);
            }
        }
        assert_eq!(config.outputs.len(), 2);
        assert_eq!(config.outputs[0].directory, "content/Chinese/posts/news");
        assert_eq!(config.outputs[0].variant, 0);
        assert_eq!(config.outputs[1].variant, 1);
    }

    #[test]
    fn test_yaml_route_resolution() {
        let yaml = r#"
rsshub_base_url: "http://10.0.0.5:1200"
regions:
  - name: "中国"
    sources:
      - name: "新华社"
        url: "/news/xhsxw"
      - name: "直连"
        url: "https://example.com/feed.xml"
outputs:
  - directory: "out/news"
"#;
        let mut config: Config = serde_yaml::from_str(yaml).unwrap();
        config.resolve_source_urls().unwrap();
        assert_eq!(
            config.regions[0].sources[0].url,
            "http://10.0.0.5:1200/news/xhsxw"
        );
        assert_eq!(
            config.regions[0].sources[1].url,
            "https://example.com/feed.xml"
        );
        assert_eq!(config.outputs[0].variant, 0);
    }

    #[test]
    fn test_yaml_max_items_override() {
        let yaml = r#"
regions:
  - name: "中国"
    sources:
      - name: "央视新闻"
        url: "/cctv/news"
        max_items: 1
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.regions[0].sources[0].max_items, 1);
        assert_eq!(config.rsshub_base_url, DEFAULT_RSSHUB_BASE_URL);
    }

    #[test]
    fn test_bad_base_url_is_an_error() {
        let yaml = r#"
rsshub_base_url: "not a url"
regions:
  - name: "x"
    sources:
      - name: "y"
        url: "/feed"
"#;
        let mut config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.resolve_source_urls().is_err());
    }
}
