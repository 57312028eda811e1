//! Storage for crawl output.
//!
//! ## Directory Structure
//!
//! ```text
//! {output_dir}/
//! ├── links.json        # Article links, appended once per run
//! └── companies.json    # Company records, appended once per batch
//! ```

pub mod json;

// Re-export for convenience
pub use json::JsonStore;
