// src/utils/http.rs

//! HTTP client utilities and the page fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Source of raw page content.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the body of `url` as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a fetcher with a client configured from `config`.
    pub fn from_config(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_text_content_type(content_type) {
                return Err(AppError::NonText {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        Ok(response.text().await?)
    }
}

fn is_text_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence.starts_with("text/") || essence.ends_with("+xml") || essence.ends_with("/xml")
}

/// A fetched page: raw content plus its parsed document.
pub struct Page {
    pub url: String,
    pub content: String,
    pub document: Html,
}

impl Page {
    /// Parse already-fetched content.
    pub fn parse(url: impl Into<String>, content: String) -> Self {
        let document = Html::parse_document(&content);
        Self {
            url: url.into(),
            content,
            document,
        }
    }

    /// Page URL as a base for resolving relative links.
    pub fn base_url(&self) -> Result<url::Url> {
        Ok(url::Url::parse(&self.url)?)
    }
}

/// Fetch a page and parse it as HTML.
pub async fn fetch_page<F>(fetcher: &F, url: &str) -> Result<Page>
where
    F: PageFetcher + ?Sized,
{
    let content = fetcher.fetch(url).await?;
    Ok(Page::parse(url, content))
}
