use crate::filter::PackageFilter;
use crate::results::{ApiMethodInfo, ApiObjectInfo, ApiParameterInfo};
use regex::Regex;
use scraper::{Html, Selector};
use std::path::Path;
use url::Url;

/// Why a mirrored page produced no catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSkip {
    /// File could not be read
    Unreadable,
    /// No constructor/method tables in the markup
    NoMethodMarkup,
    /// Page has no canonical link to derive identity from
    NoCanonicalLink,
    /// Canonical link did not yield a package and type name
    BadIdentity,
    /// Package name rejected by the package filter
    PackageFiltered,
    /// No method survived extraction
    NoMethods,
}

impl PageSkip {
    pub fn label(&self) -> &'static str {
        match self {
            PageSkip::Unreadable => "unreadable file",
            PageSkip::NoMethodMarkup => "no method markup",
            PageSkip::NoCanonicalLink => "no canonical link",
            PageSkip::BadIdentity => "unusable canonical link",
            PageSkip::PackageFiltered => "filtered out",
            PageSkip::NoMethods => "no methods retained",
        }
    }
}

/// Extracts per-method parameter signatures from one mirrored page.
///
/// The documentation generator splits each signature across two places: the
/// method anchor's URL fragment carries the fully qualified parameter types
/// ("#onSuccess(java.lang.String)") and the visible declaration text carries
/// the short types and parameter names ("onSuccess(String result)"). The two
/// lists are recovered independently and zipped positionally; a length
/// mismatch drops the method rather than misassigning types to names.
pub struct SignatureExtractor {
    url_package_prefix: String,
    filter: PackageFilter,
    rx_fragment: Regex,
    rx_inline_params: Regex,
    sel_code_blocks: Selector,
    sel_canonical: Selector,
    sel_api_signature: Selector,
    sel_method_anchor: Selector,
}

impl SignatureExtractor {
    /// `url_package_prefix` is the URL path segment between the site root
    /// and the package path in canonical links, e.g. "/reference/".
    pub fn new(url_package_prefix: &str, filter: PackageFilter) -> Self {
        // The generator marks constructor and method tables with stable id
        // substrings; only code blocks inside those tables are candidates.
        let sel_code_blocks = Selector::parse(
            "table[id*='pubctors'] code, table[id*='proctors'] code, table[id*='pubmethods'] code",
        )
        .expect("code block selector should be valid");

        Self {
            url_package_prefix: url_package_prefix.to_string(),
            filter,
            rx_fragment: Regex::new(r"(?s)#(?P<n>.*?)\((?P<p>.*?)\)")
                .expect("fragment pattern should be valid"),
            rx_inline_params: Regex::new(r"(?s)\((?P<p>.*?)\)")
                .expect("inline params pattern should be valid"),
            sel_code_blocks,
            sel_canonical: Selector::parse("link[rel='canonical']")
                .expect("canonical selector should be valid"),
            sel_api_signature: Selector::parse("code.api-signature")
                .expect("api signature selector should be valid"),
            sel_method_anchor: Selector::parse("a[href*='#']")
                .expect("anchor selector should be valid"),
        }
    }

    /// Parse a mirrored file; read failures become a skip, not an error
    pub fn parse_file(&self, path: &Path) -> Result<ApiObjectInfo, PageSkip> {
        let html = std::fs::read_to_string(path).map_err(|_| PageSkip::Unreadable)?;
        self.parse_document(&html)
    }

    /// Parse one page's markup into an object record, or report why not
    pub fn parse_document(&self, html: &str) -> Result<ApiObjectInfo, PageSkip> {
        let doc = Html::parse_document(html);

        let code_blocks: Vec<_> = doc.select(&self.sel_code_blocks).collect();
        if code_blocks.is_empty() {
            return Err(PageSkip::NoMethodMarkup);
        }

        // The canonical url gives us the full package path + type name
        let canonical = doc
            .select(&self.sel_canonical)
            .next()
            .and_then(|link| link.value().attr("href"))
            .filter(|href| !href.is_empty())
            .ok_or(PageSkip::NoCanonicalLink)?;

        let (package_name, type_name) = self
            .package_and_type(canonical)
            .ok_or(PageSkip::BadIdentity)?;
        if package_name.is_empty() || type_name.is_empty() {
            return Err(PageSkip::BadIdentity);
        }

        if !self.filter.matches(&package_name) {
            return Err(PageSkip::PackageFiltered);
        }

        let is_interface = doc
            .select(&self.sel_api_signature)
            .next()
            .map(|sig| sig.text().collect::<String>().contains("interface"))
            .unwrap_or(false);

        let mut object = ApiObjectInfo::new(package_name, type_name, is_interface);

        for block in code_blocks {
            // Only blocks whose anchor carries a '#' fragment describe methods
            let Some(href) = block
                .select(&self.sel_method_anchor)
                .next()
                .and_then(|a| a.value().attr("href"))
            else {
                continue;
            };

            let Some((method_name, param_types)) = self.parse_fragment(href) else {
                continue;
            };

            let inline_text: String = block.text().collect();
            let param_names = self.parse_inline_names(&inline_text);

            // The two lists come from unrelated markup; zip only when they
            // agree on arity, otherwise the assignment would be silently wrong
            if param_names.len() != param_types.len() {
                ::log::warn!(
                    "Parameter list mismatch in {}.{}#{}: {} types vs {} names, dropping method",
                    object.package_name,
                    object.type_name,
                    method_name,
                    param_types.len(),
                    param_names.len()
                );
                continue;
            }

            let mut method = ApiMethodInfo::new(method_name);
            for (qualified_type, name) in param_types.iter().zip(param_names) {
                method
                    .parameters
                    .push(ApiParameterInfo::from_qualified_type(name, qualified_type));
            }

            if !method.name.is_empty() && !method.parameters.is_empty() {
                object.methods.push(method);
            }
        }

        if object.methods.is_empty() {
            return Err(PageSkip::NoMethods);
        }

        Ok(object)
    }

    /// Derive (package name, type name) from a canonical page URL by
    /// stripping the configured path prefix and the ".html" suffix, then
    /// splitting at the last '/'
    fn package_and_type(&self, canonical: &str) -> Option<(String, String)> {
        let url = Url::parse(canonical).ok()?;
        let mut name = url.path().to_string();

        if !self.url_package_prefix.is_empty()
            && name
                .to_lowercase()
                .starts_with(&self.url_package_prefix.to_lowercase())
        {
            name = name[self.url_package_prefix.len()..].to_string();
        }

        if name.to_lowercase().ends_with(".html") {
            name.truncate(name.len() - 5);
        }

        let split = name.rfind('/')?;
        let package_name = name[..split].replace('/', ".");
        let type_name = name[split + 1..].to_string();

        Some((package_name, type_name))
    }

    /// Parse "#name(type, type, ...)" from a method anchor href into the
    /// method name and the ordered fully qualified parameter types
    fn parse_fragment(&self, href: &str) -> Option<(String, Vec<String>)> {
        let caps = self.rx_fragment.captures(href)?;

        let name = caps.name("n")?.as_str().to_string();
        let raw_types = caps.name("p").map(|m| m.as_str()).unwrap_or("");

        let types = if raw_types.is_empty() {
            Vec::new()
        } else {
            raw_types.split(',').map(|t| t.trim().to_string()).collect()
        };

        Some((name, types))
    }

    /// Parse the visible "(short-type name, short-type name, ...)" text of a
    /// declaration into the ordered parameter names. Entries without an
    /// interior space carry no name (empty parentheses) and are dropped.
    fn parse_inline_names(&self, text: &str) -> Vec<String> {
        let Some(caps) = self.rx_inline_params.captures(text) else {
            return Vec::new();
        };
        let inline = caps.name("p").map(|m| m.as_str()).unwrap_or("");

        inline
            .split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty() && pair.contains(' '))
            .filter_map(|pair| pair.split(' ').nth(1))
            .map(|name| name.to_string())
            .collect()
    }
}
