use std::path::Path;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::{FailurePolicy, Settings};
use crate::fetcher::Fetch;
use crate::pipeline::scrape_title;
use crate::store::{self, TitleEntry};

/// Counts returned after a batch completes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
}

/// Scrape every title and write `<ordinal>.json` into `out_dir`.
///
/// Up to `settings.concurrency` titles are in flight, but results are
/// consumed in input order, so under [`FailurePolicy::Halt`] nothing after
/// the failing title is written.
pub async fn run_batch(
    fetcher: &dyn Fetch,
    settings: &Settings,
    titles: Vec<TitleEntry>,
    out_dir: &Path,
    limit: Option<usize>,
) -> Result<BatchStats> {
    store::ensure_dir(out_dir)?;

    let total = limit.map_or(titles.len(), |n| n.min(titles.len()));
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] {bar:40} {pos}/{len} titles (eta {eta})")?
            .progress_chars("=> "),
    );
    pb.set_message("scraping");

    let mut results = stream::iter(titles.into_iter().take(total).enumerate())
        .map(|(idx, entry)| async move {
            let ordinal = idx + 1;
            info!("{}. {}", ordinal, entry.movie_name);
            let result = scrape_title(fetcher, settings, &entry.movie_name).await;
            (ordinal, entry.movie_name, result)
        })
        .buffered(settings.concurrency.max(1));

    let mut stats = BatchStats {
        total,
        ..Default::default()
    };

    while let Some((ordinal, title, result)) = results.next().await {
        pb.inc(1);
        match result {
            Ok(record) => {
                let path = store::save_record(out_dir, ordinal, &record)?;
                info!("Saved {:?} to {}", title, path.display());
                stats.ok += 1;
            }
            Err(e) if settings.on_error == FailurePolicy::Skip => {
                warn!("Skipping #{} {:?}: {}", ordinal, title, e);
                stats.failed += 1;
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e).with_context(|| format!("Title #{} {:?} failed", ordinal, title));
            }
        }
    }

    pb.finish_and_clear();
    info!(
        "Scraped {} titles ({} ok, {} failed)",
        stats.total, stats.ok, stats.failed
    );
    Ok(stats)
}
