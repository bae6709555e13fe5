use std::path::{Path, PathBuf};
use url::Url;

/// Map a page URL to its location in the local mirror: the output root
/// joined with the URL's path component.
///
/// "https://example.com/reference/android/view/View.html" under root "out"
/// becomes "out/reference/android/view/View.html".
pub fn local_path_for_url(output_root: &Path, url: &str) -> Option<PathBuf> {
    let parsed = Url::parse(url).ok()?;
    let relative = parsed.path().trim_start_matches('/');
    if relative.is_empty() {
        return None;
    }
    Some(output_root.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_path_for_url() {
        let path = local_path_for_url(
            Path::new("out"),
            "https://developer.android.com/reference/android/view/View.html",
        )
        .unwrap();
        assert_eq!(path, Path::new("out/reference/android/view/View.html"));
    }

    #[test]
    fn test_rejects_unparseable_or_rootless() {
        assert!(local_path_for_url(Path::new("out"), "not a url").is_none());
        assert!(local_path_for_url(Path::new("out"), "https://example.com/").is_none());
    }
}
