pub mod web;

pub use web::{CrawlReport, DownloadTask, Scraper};
