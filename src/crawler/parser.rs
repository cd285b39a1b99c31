//! HTML link extraction
//!
//! Given page HTML and its base URL, returns the absolute HTTP(S) URLs the
//! page links to. Everything downstream — scoping, classification, dedup —
//! happens in the crawl engine; this module only resolves hrefs.

use scraper::{Html, Selector};
use url::Url;

/// Extracts the absolute outbound links of an HTML page
///
/// Reads every `<a href>` in document order, resolving relative hrefs against
/// `base_url`. Anchors pointing at `javascript:`, `mailto:`, `tel:` and
/// `data:` targets, fragment-only anchors, and hrefs that do not resolve to
/// HTTP(S) are dropped.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(href, base_url) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

/// Resolves a single href to an absolute URL, filtering non-page schemes
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same-page anchors carry no new target
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/reports/").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="2024/summary.pdf">PDF</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://example.com/reports/2024/summary.pdf"]);
    }

    #[test]
    fn test_extract_root_relative_link() {
        let html = r#"<html><body><a href="/about">About</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://example.com/about"]);
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"
            <html><body>
                <a href="javascript:void(0)">JS</a>
                <a href="mailto:a@example.com">Mail</a>
                <a href="tel:+123">Tel</a>
                <a href="data:text/plain,hi">Data</a>
            </body></html>
        "#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_skip_fragment_only_anchor() {
        let html = r##"<html><body><a href="#top">Top</a></body></html>"##;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_download_attribute_links_are_kept() {
        // File links frequently carry the download attribute; they are the
        // whole point of the harvest.
        let html = r#"<html><body><a href="/files/report.pdf" download>Get</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://example.com/files/report.pdf"]);
    }

    #[test]
    fn test_mixed_valid_and_invalid_links() {
        let html = r#"
            <html><body>
                <a href="/valid">Valid</a>
                <a href="mailto:x@example.com">Invalid</a>
                <a href="/another">Valid</a>
            </body></html>
        "#;
        assert_eq!(extract_links(html, &base_url()).len(), 2);
    }

    #[test]
    fn test_malformed_html_still_yields_links() {
        let html = r#"<a href="/a"><p><a href="/b">unclosed"#;
        assert_eq!(extract_links(html, &base_url()).len(), 2);
    }
}
