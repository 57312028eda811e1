//! In-memory fetcher for service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::utils::http::PageFetcher;

/// Serves canned pages and records every request.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Highest number of fetches observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::crawl(url, "no such page"))
    }
}

/// Listing page with the given article hrefs and optional next link.
pub fn listing_html(articles: &[&str], next: Option<&str>) -> String {
    let mut html = String::from("<html><body>");
    for href in articles {
        html.push_str(&format!(
            r#"<div class="post"><div class="post-image"><a href="{href}">x</a></div></div>"#
        ));
    }
    if let Some(next) = next {
        html.push_str(&format!(
            r#"<div class="nav-links"><a class="next" href="{next}">Next</a></div>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

/// Article page whose table holds one row per entry of `rows`.
pub fn table_html(rows: &[&[&str]]) -> String {
    let mut html = String::from(
        "<html><body><table><thead><tr>\
         <th>Name</th><th>Website</th><th>Industry</th><th>Country</th>\
         <th>Funding Amount</th><th>Funding Type</th><th>Date</th>\
         </tr></thead><tbody>",
    );
    for row in rows {
        html.push_str("<tr>");
        for cell in *row {
            html.push_str(&format!("<td> {cell} </td>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></body></html>");
    html
}
