use std::error::Error;
use url::Url;

/// Loads the list of package paths to crawl.
///
/// The source is either an HTTP(S) URL or a local file path, chosen by
/// whether the string parses as an absolute URL. Content is one dot-separated
/// package name per line; reading stops at the first empty line, so anything
/// after a blank line is ignored. Dot separators are replaced with slashes
/// so the result can be joined directly onto the docs base URL.
pub async fn load_package_list(
    client: &reqwest::Client,
    source: &str,
) -> Result<Vec<String>, Box<dyn Error>> {
    let contents = match Url::parse(source) {
        Ok(url) => {
            ::log::info!("Fetching package list from {}", url);
            client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?
        }
        Err(_) => {
            ::log::info!("Reading package list from file {}", source);
            std::fs::read_to_string(source)?
        }
    };

    Ok(parse_package_list(&contents))
}

/// Split package-list text into slash-delimited package paths,
/// truncating at the first empty line
pub fn parse_package_list(contents: &str) -> Vec<String> {
    let mut packages = Vec::new();

    for line in contents.lines() {
        if line.is_empty() {
            break;
        }
        packages.push(line.replace('.', "/"));
    }

    packages
}
