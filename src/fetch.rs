use std::path::Path;

/// Result of a single best-effort page download.
///
/// Failures carry a reason for the crawl report but never abort the run;
/// a failed page is simply absent from the mirror.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Downloaded,
    Failed { url: String, reason: String },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Downloaded)
    }
}

/// Fetch a URL and write the response bytes verbatim to the given local
/// path, creating parent directories as needed.
pub async fn fetch_to_file(
    client: &reqwest::Client,
    url: &str,
    local_file: &Path,
) -> FetchOutcome {
    match download(client, url, local_file).await {
        Ok(()) => {
            ::log::debug!("Downloaded {} -> {}", url, local_file.display());
            FetchOutcome::Downloaded
        }
        Err(reason) => {
            ::log::debug!("Failed to download {}: {}", url, reason);
            FetchOutcome::Failed {
                url: url.to_string(),
                reason,
            }
        }
    }
}

async fn download(
    client: &reqwest::Client,
    url: &str,
    local_file: &Path,
) -> Result<(), String> {
    if let Some(parent) = local_file.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    let bytes = client
        .get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?;

    tokio::fs::write(local_file, &bytes)
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_writes_file_and_parent_dirs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reference/android/view/View.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>view</html>"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let local_file = dir.path().join("reference/android/view/View.html");

        let client = reqwest::Client::new();
        let outcome = fetch_to_file(
            &client,
            &format!("{}/reference/android/view/View.html", server.uri()),
            &local_file,
        )
        .await;

        assert!(outcome.is_success());
        assert_eq!(
            std::fs::read_to_string(local_file).unwrap(),
            "<html>view</html>"
        );
    }

    #[tokio::test]
    async fn test_http_error_becomes_failure_outcome() {
        let server = MockServer::start().await;
        // No mounted mock: every request responds 404

        let dir = tempfile::tempdir().unwrap();
        let local_file = dir.path().join("missing.html");

        let client = reqwest::Client::new();
        let url = format!("{}/missing.html", server.uri());
        let outcome = fetch_to_file(&client, &url, &local_file).await;

        match outcome {
            FetchOutcome::Failed { url: failed, .. } => assert_eq!(failed, url),
            FetchOutcome::Downloaded => panic!("expected a failure outcome"),
        }
        assert!(!local_file.exists());
    }
}
