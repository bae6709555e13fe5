use crate::filter::PackageFilter;
use crate::parsers::SignatureExtractor;
use crate::results::ApiObjectInfo;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

/// The harvested API catalog: every retained object record, in the order
/// the mirror scan discovered it
#[derive(Debug, Default)]
pub struct Catalog {
    objects: Vec<ApiObjectInfo>,
}

impl Catalog {
    pub fn from_objects(objects: Vec<ApiObjectInfo>) -> Self {
        Self { objects }
    }

    /// Scan every .html file under the mirror directory and accumulate the
    /// object records the signature extractor retains. Per-page skips are
    /// counted by reason and logged; only a missing input directory is an
    /// error.
    pub fn from_mirror(
        input_dir: &Path,
        url_package_prefix: &str,
        filter: PackageFilter,
    ) -> Result<Self, Box<dyn Error>> {
        if !input_dir.is_dir() {
            return Err(format!("input directory not found: {}", input_dir.display()).into());
        }

        let extractor = SignatureExtractor::new(url_package_prefix, filter);
        let pattern = format!("{}/**/*.html", input_dir.display());

        let mut objects = Vec::new();
        let mut skip_counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut files_seen = 0usize;

        for entry in glob::glob(&pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    ::log::warn!("Skipping unreadable mirror entry: {}", e);
                    continue;
                }
            };

            files_seen += 1;
            match extractor.parse_file(&path) {
                Ok(object) => objects.push(object),
                Err(skip) => {
                    ::log::debug!("Skipping {} ({})", path.display(), skip.label());
                    *skip_counts.entry(skip.label()).or_insert(0) += 1;
                }
            }
        }

        ::log::info!(
            "Parsed {} of {} mirrored files into the catalog",
            objects.len(),
            files_seen
        );
        for (reason, count) in &skip_counts {
            ::log::info!("  {} pages skipped: {}", count, reason);
        }

        Ok(Self { objects })
    }

    pub fn objects(&self) -> &[ApiObjectInfo] {
        &self.objects
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Group objects by package name, preserving first-seen order of both
    /// the packages and the objects inside each package. Grouping exists for
    /// serialization only; the underlying storage stays flat.
    pub fn by_package(&self) -> Vec<(&str, Vec<&ApiObjectInfo>)> {
        let mut grouped: Vec<(&str, Vec<&ApiObjectInfo>)> = Vec::new();

        for object in &self.objects {
            match grouped
                .iter_mut()
                .find(|(package, _)| *package == object.package_name)
            {
                Some((_, members)) => members.push(object),
                None => grouped.push((object.package_name.as_str(), vec![object])),
            }
        }

        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(package: &str, type_name: &str) -> ApiObjectInfo {
        ApiObjectInfo::new(package.to_string(), type_name.to_string(), false)
    }

    #[test]
    fn test_from_mirror_scans_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let page_dir = dir.path().join("reference/android/view");
        std::fs::create_dir_all(&page_dir).unwrap();

        let page = r##"<html>
<head><link rel="canonical" href="https://developer.android.com/reference/android/view/View.html"></head>
<body>
<code class="api-signature">public class View</code>
<table id="pubmethods"><tr><td><code><a href="#setTag(java.lang.Object)">setTag</a>(Object tag)</code></td></tr></table>
</body>
</html>"##;
        std::fs::write(page_dir.join("View.html"), page).unwrap();

        // A page without signature markup is skipped, not an error
        std::fs::write(
            dir.path().join("index.html"),
            "<html><body>index</body></html>",
        )
        .unwrap();

        let catalog =
            Catalog::from_mirror(dir.path(), "/reference/", PackageFilter::default()).unwrap();

        assert_eq!(catalog.len(), 1);
        let object = &catalog.objects()[0];
        assert_eq!(object.package_name, "android.view");
        assert_eq!(object.type_name, "View");
        assert_eq!(object.methods[0].parameters[0].name, "tag");
    }

    #[test]
    fn test_missing_input_dir_is_an_error() {
        assert!(
            Catalog::from_mirror(
                Path::new("/nonexistent/mirror"),
                "/reference/",
                PackageFilter::default()
            )
            .is_err()
        );
    }

    #[test]
    fn test_by_package_preserves_first_seen_order() {
        let catalog = Catalog::from_objects(vec![
            object("android.view", "View"),
            object("android.widget", "Button"),
            object("android.view", "ViewGroup"),
        ]);

        let grouped = catalog.by_package();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, "android.view");
        assert_eq!(grouped[0].1.len(), 2);
        assert_eq!(grouped[0].1[1].type_name, "ViewGroup");
        assert_eq!(grouped[1].0, "android.widget");
    }
}
