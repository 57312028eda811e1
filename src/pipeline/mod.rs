//! Pipeline entry points for crawler operations.
//!
//! - `collect_links`: Paginate the listing and snapshot article links
//! - `run_scrape`: Collect links, then extract every article's table

pub mod scrape;

pub use scrape::{ScrapeSummary, collect_links, run_scrape};
