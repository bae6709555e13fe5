use regex::Regex;
use std::path::Path;

/// Harvests hyperlink targets from raw HTML markup.
///
/// This deliberately pattern-matches on the raw text rather than building a
/// DOM: summary pages are only mined for href values, and the structural
/// extraction path in [`crate::parsers::signature`] stays independent of it.
#[derive(Debug)]
pub struct LinkExtractor {
    rx_links: Regex,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self {
            rx_links: Regex::new(r#"(?is)href="(?P<href>.*?)""#)
                .expect("link pattern should be valid"),
        }
    }

    /// Extract every non-empty href value in document order
    pub fn extract(&self, html: &str) -> Vec<String> {
        self.rx_links
            .captures_iter(html)
            .filter_map(|caps| caps.name("href"))
            .map(|m| m.as_str().to_string())
            .filter(|link| !link.is_empty())
            .collect()
    }

    /// Extract links from a mirrored file; a missing or unreadable file
    /// yields an empty list
    pub fn extract_from_file(&self, path: &Path) -> Vec<String> {
        match std::fs::read_to_string(path) {
            Ok(html) => self.extract(&html),
            Err(_) => Vec::new(),
        }
    }
}
