//! pydocs-scraper main entry point
//!
//! This is the command-line interface for the Python documentation scraper.

use anyhow::Context;
use clap::Parser;
use pydocs_scraper::config::{load_or_default, Config};
use pydocs_scraper::crawler::HttpFetcher;
use pydocs_scraper::logging::setup_logging;
use pydocs_scraper::output::control_output;
use pydocs_scraper::storage::open_cache;
use pydocs_scraper::{progress, run_mode, Mode, OutputMode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// pydocs-scraper: tables from the Python documentation sites
///
/// Scrapes docs.python.org and peps.python.org into small reports:
/// what's-new articles, documentation versions, the PDF archive, and a PEP
/// status tally cross-checked against the PEP index.
#[derive(Parser, Debug)]
#[command(name = "pydocs-scraper")]
#[command(version)]
#[command(about = "Python documentation scraper", long_about = None)]
struct Cli {
    /// What to scrape
    #[arg(value_enum)]
    mode: Mode,

    /// Extra output formats (default: plain lines on stdout)
    #[arg(short, long, value_enum)]
    output: Option<OutputMode>,

    /// Empty the response cache before scraping
    #[arg(short, long)]
    clear_cache: bool,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging needs the configured logs directory, so config errors are
    // reported on stderr directly.
    let (config, config_hash) = match load_or_default(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = setup_logging(
        cli.verbose,
        cli.quiet,
        Path::new(&config.output.logs_dir),
        config.output.max_log_bytes,
    ) {
        eprintln!("Failed to set up logging: {}", e);
        return ExitCode::FAILURE;
    }
    progress::set_quiet(cli.quiet);

    tracing::info!("Scraper started");
    tracing::info!("Command line arguments: {:?}", cli);
    tracing::debug!("Configuration hash: {}", config_hash);

    match handle_run(&cli, &config).await {
        Ok(()) => {
            tracing::info!("Scraper finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Scraper failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the selected mode and renders its rows
async fn handle_run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let cache = open_cache(Path::new(&config.cache.path), cli.clear_cache)
        .with_context(|| format!("opening cache {}", config.cache.path))?;
    let fetcher = HttpFetcher::new(&config.http)?.with_cache(cache, config.cache.expire_after_secs);

    let rows = run_mode(cli.mode, &fetcher, config)
        .await
        .with_context(|| format!("mode {}", cli.mode))?;

    if let Some(rows) = rows {
        control_output(
            &rows,
            cli.mode.as_str(),
            cli.output.unwrap_or_default(),
            Path::new(&config.output.results_dir),
        )?;
    }

    Ok(())
}
