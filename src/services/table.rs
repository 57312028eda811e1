// src/services/table.rs

//! Funding table extraction from article pages.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{CompanyRecord, Config, parse_selector};
use crate::utils::http::{Page, PageFetcher, fetch_page};

/// Turns an article's table rows into [`CompanyRecord`]s.
pub struct TableExtractor<'a, F: ?Sized> {
    fetcher: &'a F,
    row: Selector,
    cell: Selector,
    header: Selector,
}

impl<'a, F> TableExtractor<'a, F>
where
    F: PageFetcher + ?Sized,
{
    pub fn new(fetcher: &'a F, config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher,
            row: parse_selector(&config.site.row_selector)?,
            cell: parse_selector(&config.site.cell_selector)?,
            header: parse_selector(&config.site.header_selector)?,
        })
    }

    /// Fetch `url` and extract one record per table row.
    pub async fn extract_table(&self, url: &str) -> Result<Vec<CompanyRecord>> {
        let page = fetch_page(self.fetcher, url).await?;
        self.parse_table(&page)
    }

    /// Extract records from an already fetched page.
    ///
    /// Cells are mapped onto record fields by position. A row with fewer
    /// cells than [`CompanyRecord::FIELD_COUNT`] fails the whole page with
    /// [`AppError::RowShape`].
    pub fn parse_table(&self, page: &Page) -> Result<Vec<CompanyRecord>> {
        let headers = self.headers(&page.document);
        log::debug!("Table headers on {}: {:?}", page.url, headers);
        if !headers.is_empty() && headers.len() != CompanyRecord::FIELD_COUNT {
            log::warn!(
                "Table on {} has {} header cells, expected {}; fields may be misaligned",
                page.url,
                headers.len(),
                CompanyRecord::FIELD_COUNT
            );
        }

        let records = page
            .document
            .select(&self.row)
            .enumerate()
            .map(|(i, row)| {
                let cells = self.cells(row);
                CompanyRecord::from_cells(&cells).ok_or_else(|| AppError::RowShape {
                    url: page.url.clone(),
                    row: i,
                    found: cells.len(),
                    expected: CompanyRecord::FIELD_COUNT,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if records.is_empty() {
            log::warn!("No table rows found on {}", page.url);
        }
        log::debug!("Table scraped from {}: {} rows", page.url, records.len());
        Ok(records)
    }

    /// Trimmed header cell texts of the table.
    pub fn headers(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.header)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect()
    }

    fn cells(&self, row: ElementRef<'_>) -> Vec<String> {
        row.select(&self.cell)
            .map(|el| el.text().collect::<String>())
            .collect()
    }
}
