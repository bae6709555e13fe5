use crate::config::ScrapeConfig;
use crate::fetch::{self, FetchOutcome};
use crate::filter::PackageFilter;
use crate::packages;
use crate::parsers::LinkExtractor;
use crate::utils;
use std::collections::HashSet;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};

const PACKAGE_SUMMARY_FILE: &str = "package-summary.html";

/// One unit of download work: a page URL and where it lands in the mirror
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub url: String,
    pub local_file: PathBuf,
}

/// Shared state for one crawl invocation: the HTTP client, the dedup set
/// and the progress counters. Lives exactly as long as the crawl.
struct CrawlContext {
    client: reqwest::Client,
    seen: Mutex<HashSet<String>>,
    links_found: AtomicUsize,
    links_downloaded: AtomicUsize,
}

/// Aggregated outcome of a crawl. Individual download failures never abort
/// the run; they are collected here instead.
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub packages_total: usize,
    pub packages_filtered: usize,
    pub links_found: usize,
    pub links_downloaded: usize,
    pub skipped_already_seen: usize,
    pub skipped_on_disk: usize,
    /// (url, reason) per failed download
    pub failures: Vec<(String, String)>,
}

impl CrawlReport {
    pub fn log_summary(&self) {
        ::log::info!(
            "Crawl finished: {} links found, {} downloaded, {} failed",
            self.links_found,
            self.links_downloaded - self.failures.len(),
            self.failures.len()
        );
        ::log::info!(
            "Skipped: {} already queued, {} already on disk, {} of {} packages filtered out",
            self.skipped_already_seen,
            self.skipped_on_disk,
            self.packages_filtered,
            self.packages_total
        );
    }
}

/// Mirrors every documentation page reachable from the package summary
/// pages of a site, using a bounded queue and a fixed pool of download
/// workers.
pub struct Scraper {
    config: ScrapeConfig,
    output_root: PathBuf,
    filter: PackageFilter,
    context: Arc<CrawlContext>,
}

impl Scraper {
    /// Validate the configuration and build the crawl context. Fails on an
    /// uncreatable output directory or an unbuildable HTTP client; these are
    /// the only fatal setup conditions besides an unreadable package list.
    pub fn new(config: ScrapeConfig) -> Result<Self, Box<dyn Error>> {
        let output_root = PathBuf::from(&config.output_dir);
        std::fs::create_dir_all(&output_root)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let filter = PackageFilter::new(config.package_filters.clone());

        Ok(Self {
            config,
            output_root,
            filter,
            context: Arc::new(CrawlContext {
                client,
                seen: Mutex::new(HashSet::new()),
                links_found: AtomicUsize::new(0),
                links_downloaded: AtomicUsize::new(0),
            }),
        })
    }

    /// Run the crawl: workers start consuming immediately while discovery
    /// walks the package list and feeds the queue; the run is complete when
    /// every enqueued task has been attempted exactly once.
    pub async fn run(&self) -> Result<CrawlReport, Box<dyn Error>> {
        let workers = self.config.concurrency.max(1);
        ::log::info!(
            "Started scraping {} ({} workers)",
            self.config.docs_url_base,
            workers
        );

        let (task_tx, task_rx) = mpsc::channel::<DownloadTask>(1024);
        let task_rx = Arc::new(Mutex::new(task_rx));

        let mut worker_handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            worker_handles.push(spawn_worker(
                worker_id,
                Arc::clone(&self.context),
                Arc::clone(&task_rx),
            ));
        }

        let mut report = self.discover(&task_tx).await?;

        // Producer done: workers drain the queue and exit once it is empty
        drop(task_tx);
        ::log::info!(
            "Done discovering. {} links to download",
            report.links_found
        );

        for handle in worker_handles {
            let outcomes = handle.await?;
            for outcome in outcomes {
                if let FetchOutcome::Failed { url, reason } = outcome {
                    report.failures.push((url, reason));
                }
            }
        }

        report.links_downloaded = self.context.links_downloaded.load(Ordering::Relaxed);

        ::log::info!("Done scraping.");
        Ok(report)
    }

    /// Sequentially walk the package list, mirror each summary page and
    /// enqueue every in-package link not seen before
    async fn discover(
        &self,
        task_tx: &mpsc::Sender<DownloadTask>,
    ) -> Result<CrawlReport, Box<dyn Error>> {
        let package_list_source = self.config.package_list_source();
        let package_list =
            packages::load_package_list(&self.context.client, &package_list_source).await?;

        let link_extractor = LinkExtractor::new();
        let base = self.config.docs_url_base.trim_end_matches('/');

        let mut report = CrawlReport {
            packages_total: package_list.len(),
            ..CrawlReport::default()
        };

        for package in &package_list {
            if !self.filter.matches(package) {
                report.packages_filtered += 1;
                continue;
            }

            let summary_file = self.download_package_summary(base, package).await;
            let links = link_extractor.extract_from_file(&summary_file);

            // Only links under this package's own URL subtree are in scope
            let package_link_start = format!("{}/{}", base, package).to_lowercase();

            for link in links {
                if !link.to_lowercase().starts_with(&package_link_start) {
                    continue;
                }

                // Check-and-insert atomically; the key is lowercased so two
                // differently-cased spellings collapse into one task
                {
                    let mut seen = self.context.seen.lock().await;
                    if !seen.insert(link.to_lowercase()) {
                        report.skipped_already_seen += 1;
                        continue;
                    }
                }

                let Some(local_file) = utils::local_path_for_url(&self.output_root, &link)
                else {
                    continue;
                };

                // An existing mirror file short-circuits re-download
                if local_file.exists() {
                    report.skipped_on_disk += 1;
                    continue;
                }

                if let Some(parent) = local_file.parent() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        ::log::warn!("Could not create {}: {}", parent.display(), e);
                    }
                }

                if task_tx
                    .send(DownloadTask {
                        url: link,
                        local_file,
                    })
                    .await
                    .is_err()
                {
                    // All workers gone; nothing left to feed
                    ::log::error!("Download queue closed unexpectedly");
                    return Ok(report);
                }

                report.links_found = self.context.links_found.fetch_add(1, Ordering::Relaxed) + 1;
            }
        }

        Ok(report)
    }

    /// Mirror one package's summary page and return its local path. A failed
    /// fetch leaves the file absent, which degrades to an empty link set.
    async fn download_package_summary(&self, base: &str, package: &str) -> PathBuf {
        let url = format!("{}/{}/{}", base, package, PACKAGE_SUMMARY_FILE);
        let local_file = self
            .output_root
            .join("reference")
            .join(package)
            .join(PACKAGE_SUMMARY_FILE);

        let outcome = fetch::fetch_to_file(&self.context.client, &url, &local_file).await;
        if !outcome.is_success() {
            ::log::warn!("Could not fetch summary page for package {}", package);
        }

        local_file
    }
}

/// Spawn a single download worker.
///
/// Pulls tasks off the shared queue until it is closed and drained, fetching
/// each page best-effort and recording the per-task outcome.
fn spawn_worker(
    worker_id: usize,
    context: Arc<CrawlContext>,
    task_rx: Arc<Mutex<mpsc::Receiver<DownloadTask>>>,
) -> tokio::task::JoinHandle<Vec<FetchOutcome>> {
    ::log::debug!("Spawning worker {}", worker_id);

    tokio::spawn(async move {
        let mut outcomes = Vec::new();

        loop {
            // Hold the receiver lock only for the dequeue, not the download
            let task = {
                let mut rx = task_rx.lock().await;
                rx.recv().await
            };

            let Some(task) = task else {
                break;
            };

            ::log::trace!("Worker {} downloading: {}", worker_id, task.url);
            let outcome =
                fetch::fetch_to_file(&context.client, &task.url, &task.local_file).await;

            let downloaded = context.links_downloaded.fetch_add(1, Ordering::Relaxed) + 1;
            if downloaded % 100 == 0 {
                ::log::info!(
                    "{}/{} links downloaded",
                    downloaded,
                    context.links_found.load(Ordering::Relaxed)
                );
            }

            outcomes.push(outcome);
        }

        ::log::debug!("Worker {} completed - no more links to download", worker_id);
        outcomes
    })
}
