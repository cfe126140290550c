//! HTML sanitization for feed entry bodies.
//!
//! Feed summaries routinely arrive as HTML fragments. The digest quotes them
//! as plain text, so everything that looks like markup has to go.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Strip markup from `input`, returning plain text with character references
/// decoded.
///
/// Inputs without a `<`/`>` pair are returned unchanged. Otherwise the input
/// is parsed as an HTML fragment and its text nodes are concatenated in
/// document order; html5ever recovers from malformed markup on its own, so
/// the regex pass only runs as a net for inputs that parse to an element-only
/// tree. This function never fails — worst case it returns text with residual
/// malformed tags.
pub fn strip_html(input: &str) -> String {
    if !(input.contains('<') && input.contains('>')) {
        return input.to_string();
    }
    let fragment = Html::parse_fragment(input);
    let text: String = fragment.root_element().text().collect();
    if text.is_empty() {
        return TAG_RE.replace_all(input, "").to_string();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(strip_html("Heavy rain expected"), "Heavy rain expected");
        assert_eq!(strip_html("a > b"), "a > b");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn test_tags_are_removed() {
        assert_eq!(strip_html("<p>Heavy rain expected</p>"), "Heavy rain expected");
        assert_eq!(
            strip_html("<div><b>新华社</b>电 <i>记者</i>报道</div>"),
            "新华社电 记者报道"
        );
    }

    #[test]
    fn test_character_references_are_decoded() {
        assert_eq!(strip_html("<p>Rain &amp; wind</p>"), "Rain & wind");
        assert_eq!(strip_html("<span>a &lt; b</span>"), "a < b");
    }

    #[test]
    fn test_text_order_is_preserved() {
        assert_eq!(
            strip_html("<p>first</p><p>second</p>"),
            "firstsecond"
        );
    }

    #[test]
    fn test_element_only_input_falls_back_to_regex() {
        assert_eq!(strip_html("<img src=\"x.png\">"), "");
        assert_eq!(strip_html("<br><hr>"), "");
    }

    #[test]
    fn test_never_fails_on_malformed_markup() {
        // Unclosed and garbage tags must not panic; residual text survives.
        let out = strip_html("<p>before <unclosed after");
        assert!(out.contains("before"));
        let _ = strip_html("<<<>>>");
    }
}
