//! growthlist crawler CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use growthlist_crawler::{
    error::Result,
    models::{CompanyRecord, Config},
    pipeline,
    services::TableExtractor,
    storage::JsonStore,
    utils::http::HttpFetcher,
};

/// growthlist crawler - funding tables to JSON
#[derive(Parser, Debug)]
#[command(
    name = "growthlist-crawler",
    version,
    about = "Scrapes funded-startup tables into JSON"
)]
struct Cli {
    /// Directory containing config.toml
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Output directory (default: paths.output_dir from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline: paginate → extract tables
    Scrape {
        /// Listing URL to start from (default: site.seed_url)
        #[arg(long)]
        seed: Option<String>,
    },

    /// Collect article links only
    Links {
        /// Listing URL to start from (default: site.seed_url)
        #[arg(long)]
        seed: Option<String>,
    },

    /// Extract one article's table and print it as JSON
    Table {
        /// Article URL
        url: String,
    },

    /// Show how many links and records are stored
    Info,

    /// Validate configuration file
    Validate,
}

/// Initialize logging from the verbosity flag or the configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config_path = cli.storage_dir.join("config.toml");
    let loaded = Config::load_or_default(&config_path);
    let level = match &loaded {
        Ok(config) => config.logging.level.as_str(),
        Err(_) => "info",
    };
    init_logging(cli.verbose, level);

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            log::error!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if config_path.exists() {
        log::info!("Loaded configuration from {}", config_path.display());
    } else {
        log::warn!("No config at {}; using defaults", config_path.display());
    }

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.paths.output_dir));
    let store = JsonStore::new(output_dir);

    if let Err(e) = run(cli.command, &mut config, &store).await {
        log::error!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command, config: &mut Config, store: &JsonStore) -> Result<()> {
    match command {
        Command::Scrape { seed } => {
            if let Some(seed) = seed {
                config.site.seed_url = seed;
            }
            config.validate()?;

            let fetcher = HttpFetcher::from_config(&config.crawler)?;
            pipeline::run_scrape(config, &fetcher, store).await?;
        }

        Command::Links { seed } => {
            if let Some(seed) = seed {
                config.site.seed_url = seed;
            }
            config.validate()?;

            let fetcher = HttpFetcher::from_config(&config.crawler)?;
            let links = pipeline::collect_links(config, &fetcher, store).await?;
            log::info!("Collected {} links", links.len());
        }

        Command::Table { url } => {
            let fetcher = HttpFetcher::from_config(&config.crawler)?;
            let extractor = TableExtractor::new(&fetcher, config)?;
            let records: Vec<CompanyRecord> = extractor.extract_table(&url).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Command::Info => {
            log::info!("Output directory: {}", store.root_dir().display());
            for file in [&config.paths.links_file, &config.paths.records_file] {
                log::info!("{}: {} entries", file, store.count(file).await?);
            }
            if let Some(aggregate) = &config.paths.aggregate_file {
                log::info!("{}: {} entries", aggregate, store.count(aggregate).await?);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!("✓ Config OK (selectors parse, seed URL is absolute)");
        }
    }

    log::info!("Done!");
    Ok(())
}
