// src/services/batch.rs

//! Batched table extraction.
//!
//! Links are split into fixed-size batches. The pages of one batch are
//! fetched concurrently and the batch is joined before the next one starts,
//! so at most `batch_size` requests are in flight. Each batch is appended to
//! the records file as soon as it completes.

use std::slice::Chunks;

use futures::future::try_join_all;

use crate::error::Result;
use crate::models::{CompanyRecord, Config};
use crate::services::TableExtractor;
use crate::storage::JsonStore;
use crate::utils::http::PageFetcher;

/// Drives the [`TableExtractor`] over a list of article links.
pub struct BatchProcessor<'a, F: ?Sized> {
    extractor: TableExtractor<'a, F>,
    store: &'a JsonStore,
    records_file: String,
    batch_size: usize,
}

impl<'a, F> BatchProcessor<'a, F>
where
    F: PageFetcher + ?Sized,
{
    pub fn new(fetcher: &'a F, store: &'a JsonStore, config: &Config) -> Result<Self> {
        Ok(Self {
            extractor: TableExtractor::new(fetcher, config)?,
            store,
            records_file: config.paths.records_file.clone(),
            batch_size: config.crawler.batch_size.max(1),
        })
    }

    /// Split `links` the way [`Self::process_links`] will.
    pub fn batches<'l>(&self, links: &'l [String]) -> Chunks<'l, String> {
        links.chunks(self.batch_size)
    }

    /// Extract records from every link, persisting after each batch.
    ///
    /// Any failing link fails its batch and aborts the run. Batches that
    /// completed earlier stay on disk.
    pub async fn process_links(&self, links: &[String]) -> Result<Vec<CompanyRecord>> {
        let total = links.len().div_ceil(self.batch_size);
        let mut results = Vec::new();

        for (index, batch) in self.batches(links).enumerate() {
            let jobs = batch.iter().map(|link| self.extractor.extract_table(link));
            let tables = try_join_all(jobs).await?;
            let records: Vec<CompanyRecord> = tables.into_iter().flatten().collect();

            let stored = self.store.append(&records, &self.records_file).await?;
            log::info!(
                "Batch {}/{} scraped: {} links, {} records ({} stored)",
                index + 1,
                total,
                batch.len(),
                records.len(),
                stored
            );

            results.extend(records);
        }

        Ok(results)
    }
}
