//! nhentai (nhentai.net) gallery adapter.
//!
//! The landing page lists every thumbnail at once, so the page count is the
//! thumbnail count and per-page URLs are plain path substitution:
//! `<gallery>/1`, `<gallery>/2`, ...

use super::{GalleryAdapter, GalleryInfo, create_http_client, rate_limit};
use crate::config::ScrapeConfig;
use crate::error::ScraperError;
use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Compiled regex patterns for nhentai gallery URLs.
static URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Gallery landing pages: /g/<numeric id>
        Regex::new(r"https?://nhentai\.net/g/\d+/?").unwrap(),
    ]
});

/// CSS selectors used for parsing.
struct Selectors {
    /// Gallery title (the "pretty" short form inside the h1).
    title: Selector,
    /// Thumbnail images on the landing page.
    thumb: Selector,
    /// Full-resolution image on a page view.
    full_image: Selector,
}

impl Selectors {
    fn new() -> Self {
        Self {
            title: Selector::parse("h1.title .pretty").unwrap(),
            thumb: Selector::parse("div.thumb-container img").unwrap(),
            full_image: Selector::parse("#image-container img").unwrap(),
        }
    }
}

/// nhentai adapter for nhentai.net.
pub struct NhentaiAdapter {
    client: reqwest::Client,
    config: ScrapeConfig,
    selectors: Selectors,
}

impl Default for NhentaiAdapter {
    fn default() -> Self {
        Self::new(ScrapeConfig::nhentai())
    }
}

impl NhentaiAdapter {
    /// Creates a new nhentai adapter with the given configuration.
    pub fn new(config: ScrapeConfig) -> Self {
        let client = create_http_client().expect("Failed to create HTTP client");

        Self {
            client,
            config,
            selectors: Selectors::new(),
        }
    }

    /// Fetches a page and returns the HTML document.
    async fn fetch_page(&self, url: &str) -> Result<Html, ScraperError> {
        rate_limit(self.config.delay_between_requests_sec).await;

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ScraperError::HttpError(
                response.error_for_status().unwrap_err(),
            ));
        }

        let text = response.text().await?;
        Ok(Html::parse_document(&text))
    }

    /// Extracts the gallery title, falling back to "Untitled" if absent.
    fn extract_title(&self, doc: &Html) -> String {
        doc.select(&self.selectors.title)
            .next()
            .map(|elem| elem.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Counts landing-page thumbnails to determine the page count.
    fn extract_page_count(&self, doc: &Html) -> Result<u32, ScraperError> {
        let count = doc.select(&self.selectors.thumb).count();
        if count == 0 {
            return Err(ScraperError::ElementNotFound(
                "page count (no thumbnails)".to_string(),
            ));
        }
        Ok(count as u32)
    }
}

#[async_trait]
impl GalleryAdapter for NhentaiAdapter {
    fn name(&self) -> &'static str {
        "nhentai"
    }

    fn source(&self) -> &'static str {
        "nhentai"
    }

    fn can_handle(&self, url: &str) -> bool {
        URL_PATTERNS.iter().any(|pattern| pattern.is_match(url))
    }

    async fn fetch_info(&self, url: &str) -> Result<GalleryInfo, ScraperError> {
        if !self.can_handle(url) {
            return Err(ScraperError::UnsupportedUrl(url.to_string()));
        }

        let doc = self.fetch_page(url).await?;
        let title = self.extract_title(&doc);
        let page_count = self.extract_page_count(&doc)?;

        Ok(GalleryInfo { title, page_count })
    }

    async fn enumerate_page_urls(
        &self,
        url: &str,
        page_count: u32,
    ) -> Result<Vec<String>, ScraperError> {
        // Pure path substitution, no network.
        let base = url.trim_end_matches('/');
        Ok((1..=page_count).map(|i| format!("{}/{}", base, i)).collect())
    }

    async fn resolve_image_url(&self, page_url: &str) -> Result<String, ScraperError> {
        let doc = self.fetch_page(page_url).await?;

        doc.select(&self.selectors.full_image)
            .next()
            .and_then(|elem| elem.value().attr("src"))
            .map(|src| src.to_string())
            .ok_or_else(|| {
                ScraperError::ElementNotFound(format!("full image on page: {}", page_url))
            })
    }
}
