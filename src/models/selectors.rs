// src/models/selectors.rs

//! CSS selectors for scraping the listing and article pages.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// CSS selectors for the listing pages and the article tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSelectors {
    /// Listing page where pagination starts
    #[serde(default = "defaults::seed_url")]
    pub seed_url: String,

    /// Selector for the "next page" anchor on a listing page
    #[serde(default = "defaults::next_page")]
    pub next_page_selector: String,

    /// Selector for article anchors on a listing page
    #[serde(default = "defaults::article_link")]
    pub article_link_selector: String,

    /// Selector for each data row of the article table
    #[serde(default = "defaults::row")]
    pub row_selector: String,

    /// Selector for cells within a row
    #[serde(default = "defaults::cell")]
    pub cell_selector: String,

    /// Selector for header cells of the article table
    #[serde(default = "defaults::header")]
    pub header_selector: String,

    /// HTML attribute holding link targets (usually "href")
    #[serde(default = "defaults::link_attr")]
    pub link_attr: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            seed_url: defaults::seed_url(),
            next_page_selector: defaults::next_page(),
            article_link_selector: defaults::article_link(),
            row_selector: defaults::row(),
            cell_selector: defaults::cell(),
            header_selector: defaults::header(),
            link_attr: defaults::link_attr(),
        }
    }
}

impl SiteSelectors {
    /// Check that every selector parses.
    pub fn validate(&self) -> Result<()> {
        for s in [
            &self.next_page_selector,
            &self.article_link_selector,
            &self.row_selector,
            &self.cell_selector,
            &self.header_selector,
        ] {
            parse_selector(s)?;
        }
        Ok(())
    }
}

/// Parse a CSS selector, mapping failures to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

mod defaults {
    pub fn seed_url() -> String {
        "https://growthlist.co/author/admin/page/1/".into()
    }
    pub fn next_page() -> String {
        "div > a.next".into()
    }
    pub fn article_link() -> String {
        "div > div.post-image > a".into()
    }
    pub fn row() -> String {
        "tbody tr".into()
    }
    pub fn cell() -> String {
        "td".into()
    }
    pub fn header() -> String {
        "thead th".into()
    }
    pub fn link_attr() -> String {
        "href".into()
    }
}
