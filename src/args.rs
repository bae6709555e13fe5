use clap::{Parser, Subcommand, ValueEnum};
use docsig::config::{ScrapeConfig, TransformConfig};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(name = "docsig")]
#[command(about = "Harvests API signatures from generated documentation sites")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mirror documentation pages from a site
    Scrape(ScrapeArgs),

    /// Parse a local mirror and serialize the signature catalog
    Transform(TransformArgs),
}

#[derive(clap::Args, Debug)]
pub struct ScrapeArgs {
    /// Url to scrape docs from
    #[arg(short, long)]
    pub url: Option<String>,

    /// Local directory to save the scraped docs to
    #[arg(short, long)]
    pub out: Option<String>,

    /// An alternate file or url to load package-list contents from
    #[arg(short = 's', long)]
    pub package_list_source: Option<String>,

    /// Only process package names that start with one of these filters
    #[arg(short = 'f', long = "package-filter")]
    pub package_filters: Vec<String>,

    /// Number of concurrent download workers
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// JSON configuration file; explicit flags override its values
    #[arg(long)]
    pub config: Option<String>,
}

impl ScrapeArgs {
    /// Resolve the configuration from the optional config file plus flag
    /// overrides. Without a config file, --url and --out are required.
    pub fn into_config(self) -> Result<ScrapeConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => ScrapeConfig::from_file(path)?,
            None => {
                let url = self
                    .url
                    .as_deref()
                    .ok_or("missing --url (or provide --config)")?;
                let out = self
                    .out
                    .as_deref()
                    .ok_or("missing --out (or provide --config)")?;
                ScrapeConfig::new(url, out)
            }
        };

        if self.config.is_some() {
            if let Some(url) = self.url {
                config.docs_url_base = url;
            }
            if let Some(out) = self.out {
                config.output_dir = out;
            }
        }
        if let Some(source) = self.package_list_source {
            config.package_list_source = Some(source);
        }
        if !self.package_filters.is_empty() {
            config.package_filters = self.package_filters;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }

        Ok(config)
    }
}

#[derive(clap::Args, Debug)]
pub struct TransformArgs {
    /// Directory with mirrored docs to parse
    #[arg(short, long)]
    pub dir: String,

    /// File to write the serialized catalog to
    #[arg(short, long)]
    pub out: String,

    /// Type of output to serialize
    #[arg(short = 't', long = "type", value_enum)]
    pub format: OutputFormat,

    /// Prefix in the doc url which follows the base url but is not part of
    /// the package name itself, eg "/reference/"
    #[arg(short, long)]
    pub prefix: String,

    /// Only process package names that start with one of these filters
    #[arg(short = 'f', long = "package-filter")]
    pub package_filters: Vec<String>,
}

impl TransformArgs {
    pub fn into_config(self) -> (TransformConfig, OutputFormat) {
        (
            TransformConfig {
                input_dir: self.dir,
                output_file: self.out,
                url_package_prefix: self.prefix,
                package_filters: self.package_filters,
            },
            self.format,
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Flat name-override records keyed by XPath locators
    Metadata,
    /// Nested descriptive catalog document
    Xml,
}
