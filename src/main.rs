mod batch;
mod config;
mod error;
mod fetcher;
mod parser;
mod pipeline;
mod search;
mod store;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{FailurePolicy, Settings};

const DEFAULT_INPUT: &str = "./data/movies.json";
const DEFAULT_OUTPUT_DIR: &str = "./data";
const USAGE: &str = "Call with: imdb_scraper <moviesPath> <outputDir>";

#[derive(Parser)]
#[command(name = "imdb_scraper", about = "Scrape IMDb movie metadata for a list of titles")]
struct Cli {
    /// JSON array of {"movie_name": ...} objects
    input: Option<PathBuf>,
    /// Directory receiving one <n>.json per title
    output_dir: Option<PathBuf>,
    /// Only process the first N titles
    #[arg(short = 'n', long)]
    limit: Option<usize>,
    /// Titles scraped in parallel
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,
    /// Behaviour when a title cannot be scraped
    #[arg(long, value_enum)]
    on_error: Option<FailurePolicy>,
    /// Config file (default: ./imdb_scraper.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Debug logging unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Both paths or neither; `None` means the usage line should be shown.
    fn paths(&self) -> Option<(PathBuf, PathBuf)> {
        match (&self.input, &self.output_dir) {
            (Some(input), Some(output)) => Some((input.clone(), output.clone())),
            (None, None) => Some((DEFAULT_INPUT.into(), DEFAULT_OUTPUT_DIR.into())),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let Some((input, output_dir)) = cli.paths() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let t0 = Instant::now();

    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply_cli(cli.concurrency, cli.on_error)?;

    parser::extract::validate_selectors().context("Built-in selectors are invalid")?;

    let titles = store::load_titles(&input)?;
    println!(
        "Scraping {} titles from {} into {}...",
        cli.limit.map_or(titles.len(), |n| n.min(titles.len())),
        input.display(),
        output_dir.display()
    );

    let fetcher = fetcher::HttpFetcher::new(&settings).context("Failed to build HTTP client")?;
    let stats = batch::run_batch(&fetcher, &settings, titles, &output_dir, cli.limit).await?;
    println!(
        "Done: {} titles ({} saved, {} failed).",
        stats.total, stats.ok, stats.failed
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Elapsed: {}", format_elapsed(elapsed));
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "imdb_scraper=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs();
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    match (h, m) {
        (0, 0) => format!("{:.1}s", d.as_secs_f64()),
        (0, _) => format!("{}m {}s", m, s),
        _ => format!("{}h {}m {}s", h, m, s),
    }
}
