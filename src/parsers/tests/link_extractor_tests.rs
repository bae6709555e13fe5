use crate::parsers::LinkExtractor;
use std::path::Path;

#[test]
fn test_extracts_hrefs_in_document_order() {
    let html = r#"<html><body>
        <a href="https://example.com/reference/android/view/View.html">View</a>
        <p>filler</p>
        <a href="https://example.com/reference/android/view/ViewGroup.html">ViewGroup</a>
    </body></html>"#;

    let extractor = LinkExtractor::new();
    let links = extractor.extract(html);
    assert_eq!(
        links,
        vec![
            "https://example.com/reference/android/view/View.html",
            "https://example.com/reference/android/view/ViewGroup.html",
        ]
    );
}

#[test]
fn test_matches_attribute_case_insensitively() {
    let extractor = LinkExtractor::new();
    let links = extractor.extract(r#"<A HREF="https://example.com/page.html">x</A>"#);
    assert_eq!(links, vec!["https://example.com/page.html"]);
}

#[test]
fn test_empty_hrefs_are_dropped() {
    let extractor = LinkExtractor::new();
    let links = extractor.extract(r#"<a href="">empty</a><a href="real.html">x</a>"#);
    assert_eq!(links, vec!["real.html"]);
}

#[test]
fn test_non_anchor_hrefs_are_still_matched() {
    // Raw pattern matching deliberately picks up href attributes anywhere,
    // including link elements; scoping happens later via the URL prefix check
    let extractor = LinkExtractor::new();
    let links = extractor.extract(r#"<link rel="stylesheet" href="style.css">"#);
    assert_eq!(links, vec!["style.css"]);
}

#[test]
fn test_missing_file_yields_no_links() {
    let extractor = LinkExtractor::new();
    let links = extractor.extract_from_file(Path::new("/nonexistent/summary.html"));
    assert!(links.is_empty());
}

#[test]
fn test_extract_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("package-summary.html");
    std::fs::write(&path, r#"<a href="View.html">View</a>"#).unwrap();

    let extractor = LinkExtractor::new();
    assert_eq!(extractor.extract_from_file(&path), vec!["View.html"]);
}
