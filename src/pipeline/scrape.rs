// src/pipeline/scrape.rs

//! End-to-end scrape: paginate, snapshot links, extract tables.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::models::Config;
use crate::services::{BatchProcessor, Paginator};
use crate::storage::JsonStore;
use crate::utils::http::PageFetcher;

/// Totals for one scrape run.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeSummary {
    pub link_count: usize,
    pub record_count: usize,
    pub batch_count: usize,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl ScrapeSummary {
    pub fn elapsed(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }
}

/// Paginate from the configured seed and append the links to the links file.
pub async fn collect_links(
    config: &Config,
    fetcher: &dyn PageFetcher,
    store: &JsonStore,
) -> Result<Vec<String>> {
    let paginator = Paginator::new(fetcher, config)?;
    let links = paginator.paginate(&config.site.seed_url).await?;

    store.append(&links, &config.paths.links_file).await?;
    log::info!(
        "Links written to {}",
        store.path(&config.paths.links_file).display()
    );

    Ok(links)
}

/// Run the full scrape.
///
/// Records reach disk only through the per-batch appends to
/// `paths.records_file`. When `paths.aggregate_file` is set, the full result
/// is additionally appended there once every batch has finished.
pub async fn run_scrape(
    config: &Config,
    fetcher: &dyn PageFetcher,
    store: &JsonStore,
) -> Result<ScrapeSummary> {
    let start_time = Utc::now();
    log::info!("Scrape starting from {}", config.site.seed_url);

    let links = collect_links(config, fetcher, store).await?;

    let processor = BatchProcessor::new(fetcher, store, config)?;
    let batch_count = processor.batches(&links).len();
    let records = processor.process_links(&links).await?;

    if let Some(aggregate) = &config.paths.aggregate_file {
        store.append(&records, aggregate).await?;
        log::info!(
            "Aggregate of {} records written to {}",
            records.len(),
            store.path(aggregate).display()
        );
    }

    let summary = ScrapeSummary {
        link_count: links.len(),
        record_count: records.len(),
        batch_count,
        start_time,
        end_time: Utc::now(),
    };

    log::info!(
        "Scrape complete: {} links, {} records in {} batches ({} ms)",
        summary.link_count,
        summary.record_count,
        summary.batch_count,
        summary.elapsed().num_milliseconds()
    );
    log::info!(
        "All data written to {}",
        store.path(&config.paths.records_file).display()
    );

    Ok(summary)
}
