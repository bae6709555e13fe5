// Re-export modules
pub mod catalog;
pub mod config;
pub mod crawlers;
pub mod fetch;
pub mod filter;
pub mod packages;
pub mod parsers;
pub mod results;
pub mod serialize;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::Catalog;
pub use config::{ScrapeConfig, TransformConfig};
pub use crawlers::web::{CrawlReport, Scraper};
pub use filter::PackageFilter;
pub use results::{ApiMethodInfo, ApiObjectInfo, ApiParameterInfo};
