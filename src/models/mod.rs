// src/models/mod.rs

//! Domain models for the crawler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod record;
mod selectors;

// Re-export all public types
pub use config::{Config, CrawlerConfig, LoggingConfig, PathsConfig};
pub use record::{CompanyRecord, RECORD_FIELDS};
pub use selectors::{SiteSelectors, parse_selector};
