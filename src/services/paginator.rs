// src/services/paginator.rs

//! Listing pagination.
//!
//! Follows the "next page" chain from a seed URL and accumulates article
//! links from every page. Pages are fetched strictly one after another since
//! each URL comes from the previous page.

use std::collections::HashSet;

use scraper::Selector;

use crate::error::Result;
use crate::models::{Config, parse_selector};
use crate::services::links::{extract_first_link, extract_links, resolve_all};
use crate::utils::http::{Page, PageFetcher, fetch_page};
use crate::utils::{resolve_page_url, without_fragment};

/// Walks a listing's "next page" chain collecting article links.
pub struct Paginator<'a, F: ?Sized> {
    fetcher: &'a F,
    next_page: Selector,
    article_link: Selector,
    link_attr: String,
    max_pages: usize,
}

impl<'a, F> Paginator<'a, F>
where
    F: PageFetcher + ?Sized,
{
    /// Create a paginator using the selectors and page limit from `config`.
    pub fn new(fetcher: &'a F, config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher,
            next_page: parse_selector(&config.site.next_page_selector)?,
            article_link: parse_selector(&config.site.article_link_selector)?,
            link_attr: config.site.link_attr.clone(),
            max_pages: config.crawler.max_pages.max(1),
        })
    }

    /// Override the maximum number of pages fetched.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Collect article links from `start_url` and every following page.
    ///
    /// Links keep their per-page document order and pages are concatenated
    /// in crawl order. Links repeated across pages are kept. The walk stops
    /// when a page has no next link, when the next link points at a page
    /// already visited, or after `max_pages` pages.
    pub async fn paginate(&self, start_url: &str) -> Result<Vec<String>> {
        let mut url = start_url.to_string();
        let mut collected = Vec::new();
        let mut visited = HashSet::new();
        let mut pages = 0usize;

        loop {
            visited.insert(without_fragment(&url));
            let page = fetch_page(self.fetcher, &url).await?;
            pages += 1;

            let (next, links) = self.scan(&page)?;
            log::debug!("Listing page {} ({}): {} links", pages, url, links.len());
            collected.extend(links);

            let Some(next) = next else {
                break;
            };
            if visited.contains(&next) {
                log::warn!(
                    "Next page {} was already visited; stopping pagination",
                    next
                );
                break;
            }
            if pages >= self.max_pages {
                log::warn!(
                    "Reached page limit ({}); stopping before {}",
                    self.max_pages,
                    next
                );
                break;
            }
            url = next;
        }

        log::info!(
            "All links scraped: {} links from {} pages",
            collected.len(),
            pages
        );
        Ok(collected)
    }

    /// Extract the next-page URL and the article links of one page.
    fn scan(&self, page: &Page) -> Result<(Option<String>, Vec<String>)> {
        let base = page.base_url()?;
        let next = extract_first_link(&page.document, &self.next_page, &self.link_attr)
            .map(|href| resolve_page_url(&base, &href));
        let links = resolve_all(
            &base,
            extract_links(&page.document, &self.article_link, &self.link_attr),
        );
        Ok((next, links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{StaticFetcher, listing_html};

    const P1: &str = "https://example.com/page/1/";
    const P2: &str = "https://example.com/page/2/";
    const P3: &str = "https://example.com/page/3/";

    #[tokio::test]
    async fn test_single_page_without_next() {
        let fetcher = StaticFetcher::new().with_page(P1, listing_html(&["/a", "/b"], None));
        let paginator = Paginator::new(&fetcher, &Config::default()).unwrap();

        let links = paginator.paginate(P1).await.unwrap();

        assert_eq!(links, vec!["https://example.com/a", "https://example.com/b"]);
        assert_eq!(fetcher.calls(), vec![P1]);
    }

    #[tokio::test]
    async fn test_follows_chain_in_order() {
        let fetcher = StaticFetcher::new()
            .with_page(P1, listing_html(&["/a", "/b"], Some("/page/2/")))
            .with_page(P2, listing_html(&["/c", "/a"], Some(P3)))
            .with_page(P3, listing_html(&["/d"], None));
        let paginator = Paginator::new(&fetcher, &Config::default()).unwrap();

        let links = paginator.paginate(P1).await.unwrap();

        assert_eq!(
            links,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c",
                "https://example.com/a",
                "https://example.com/d",
            ]
        );
        assert_eq!(fetcher.calls(), vec![P1, P2, P3]);
        assert_eq!(fetcher.max_in_flight(), 1);
    }

    #[tokio::test]
    async fn test_stops_on_cycle() {
        let fetcher = StaticFetcher::new()
            .with_page(P1, listing_html(&["/a"], Some(P2)))
            .with_page(P2, listing_html(&["/b"], Some(P1)));
        let paginator = Paginator::new(&fetcher, &Config::default()).unwrap();

        let links = paginator.paginate(P1).await.unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(fetcher.calls(), vec![P1, P2]);
    }

    #[tokio::test]
    async fn test_fragment_next_link_is_same_page() {
        let fetcher = StaticFetcher::new().with_page(P1, listing_html(&["/a"], Some("#")));
        let paginator = Paginator::new(&fetcher, &Config::default()).unwrap();

        let links = paginator.paginate(P1).await.unwrap();

        assert_eq!(links, vec!["https://example.com/a"]);
        assert_eq!(fetcher.calls(), vec![P1]);
    }

    #[tokio::test]
    async fn test_stops_at_page_limit() {
        let fetcher = StaticFetcher::new()
            .with_page(P1, listing_html(&["/a"], Some(P2)))
            .with_page(P2, listing_html(&["/b"], Some(P3)))
            .with_page(P3, listing_html(&["/c"], None));
        let paginator = Paginator::new(&fetcher, &Config::default())
            .unwrap()
            .with_max_pages(2);

        let links = paginator.paginate(P1).await.unwrap();

        assert_eq!(links, vec!["https://example.com/a", "https://example.com/b"]);
        assert_eq!(fetcher.calls(), vec![P1, P2]);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let fetcher = StaticFetcher::new().with_page(P1, listing_html(&["/a"], Some(P2)));
        let paginator = Paginator::new(&fetcher, &Config::default()).unwrap();

        assert!(paginator.paginate(P1).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_listing_returns_no_links() {
        let fetcher = StaticFetcher::new().with_page(P1, "<html><body></body></html>");
        let paginator = Paginator::new(&fetcher, &Config::default()).unwrap();

        assert!(paginator.paginate(P1).await.unwrap().is_empty());
    }
}
