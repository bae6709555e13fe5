/// Package-name prefix filter used by both the crawler and the parser.
///
/// An empty filter set accepts every package. Matching is case-insensitive
/// and tolerant of both dot- and slash-delimited spellings on either side,
/// so a filter of "android/view" accepts the package "android.view" and
/// vice versa.
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    prefixes: Vec<String>,
}

impl PackageFilter {
    /// Create a filter from a list of package-name prefixes
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Whether the given package name passes the filter
    pub fn matches(&self, package: &str) -> bool {
        if self.prefixes.is_empty() {
            return true;
        }

        let package_lower = package.to_lowercase();
        let package_dotted = package_lower.replace('/', ".");

        self.prefixes.iter().any(|prefix| {
            let prefix_lower = prefix.to_lowercase();
            let prefix_dotted = prefix_lower.replace('/', ".");

            package_dotted.starts_with(&prefix_dotted)
                || package_lower.starts_with(&prefix_lower)
        })
    }
}
