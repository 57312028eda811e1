//! Service layer for the crawler.
//!
//! This module contains the scraping logic:
//! - Link extraction (`links`)
//! - Listing pagination (`Paginator`)
//! - Funding table extraction (`TableExtractor`)
//! - Batched extraction with incremental persistence (`BatchProcessor`)

mod batch;
pub mod links;
mod paginator;
mod table;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::BatchProcessor;
pub use paginator::Paginator;
pub use table::TableExtractor;
