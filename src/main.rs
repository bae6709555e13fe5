use clap::Parser;
use docsig::catalog::Catalog;
use docsig::crawlers::web::Scraper;
use docsig::filter::PackageFilter;
use docsig::serialize;
use std::error::Error;
use std::path::Path;

mod args;
use args::{Args, Command, OutputFormat, ScrapeArgs, TransformArgs};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let result = match args.command {
        Command::Scrape(scrape) => run_scrape(scrape).await,
        Command::Transform(transform) => run_transform(transform),
    };

    // Only configuration-level failures reach this point; everything inside
    // the crawl and parse loops is best-effort
    if let Err(e) = result {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run_scrape(scrape: ScrapeArgs) -> Result<(), Box<dyn Error>> {
    let config = scrape.into_config()?;
    ::log::info!("Scraping {} into {}", config.docs_url_base, config.output_dir);

    let scraper = Scraper::new(config)?;
    let report = scraper.run().await?;
    report.log_summary();

    Ok(())
}

fn run_transform(transform: TransformArgs) -> Result<(), Box<dyn Error>> {
    let (config, format) = transform.into_config();

    let filter = PackageFilter::new(config.package_filters.clone());
    let catalog = Catalog::from_mirror(
        Path::new(&config.input_dir),
        &config.url_package_prefix,
        filter,
    )?;

    ::log::info!(
        "Catalog holds {} objects, writing {} output to {}",
        catalog.len(),
        match format {
            OutputFormat::Metadata => "override metadata",
            OutputFormat::Xml => "descriptive",
        },
        config.output_file
    );

    let out = Path::new(&config.output_file);
    match format {
        OutputFormat::Metadata => serialize::write_override_metadata(out, &catalog)?,
        OutputFormat::Xml => serialize::write_descriptive_xml(out, &catalog)?,
    }

    Ok(())
}
