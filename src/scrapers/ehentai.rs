//! E-Hentai (e-hentai.org) gallery adapter.
//!
//! Galleries present a paginated thumbnail grid, 40 thumbnails per gallery
//! page, so enumeration walks `?p=0`, `?p=1`, ... until the reported page
//! count is covered.

use super::{GalleryAdapter, GalleryInfo, create_http_client, rate_limit, resolve_url};
use crate::config::ScrapeConfig;
use crate::error::ScraperError;
use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Compiled regex patterns for e-hentai gallery URLs.
static URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Gallery landing pages: /g/<gallery id>/<token>
        Regex::new(r"https?://e-hentai\.org/g/\d+/\w+/?").unwrap(),
    ]
});

/// CSS selectors used for parsing.
struct Selectors {
    /// Gallery title heading.
    title: Selector,
    /// Table cells on the landing page; the one labelled `Length:` carries
    /// the page count in its sibling.
    td: Selector,
    /// Thumbnail links in the gallery grid.
    thumb_link: Selector,
    /// Full-resolution image on a page view.
    full_image: Selector,
}

impl Selectors {
    fn new() -> Self {
        Self {
            title: Selector::parse("#gn").unwrap(),
            td: Selector::parse("td").unwrap(),
            thumb_link: Selector::parse("div#gdt a").unwrap(),
            full_image: Selector::parse("#img").unwrap(),
        }
    }
}

/// E-Hentai adapter for e-hentai.org.
pub struct EhentaiAdapter {
    client: reqwest::Client,
    config: ScrapeConfig,
    selectors: Selectors,
}

impl Default for EhentaiAdapter {
    fn default() -> Self {
        Self::new(ScrapeConfig::ehentai())
    }
}

impl EhentaiAdapter {
    /// Creates a new e-hentai adapter with the given configuration.
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

    /// Extracts the total page count from the `Length:` table row.
    fn extract_page_count(&self, doc: &Html) -> Result<u32, ScraperError> {
        let label_td = doc
            .select(&self.selectors.td)
            .find(|td| td.text().collect::<String>().trim() == "Length:")
            .ok_or_else(|| ScraperError::ElementNotFound("page count (Length:)".to_string()))?;

        let value_td = label_td
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "td")
            .ok_or_else(|| ScraperError::ElementNotFound("page count value".to_string()))?;

        let text = value_td.text().collect::<String>();
        text.split_whitespace()
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| {
                ScraperError::ParseError(format!(
                    "could not parse page count from '{}'",
                    text.trim()
                ))
            })
    }

    /// Extracts thumbnail link hrefs from a gallery page, in grid order.
    fn extract_thumb_links(&self, doc: &Html, base_url: &str) -> Vec<String> {
        doc.select(&self.selectors.thumb_link)
            .filter_map(|elem| elem.value().attr("href"))
            .map(|href| resolve_url(base_url, href))
            .collect()
    }

    /// Number of gallery pages needed to cover `page_count` thumbnails.
    fn gallery_page_count(&self, page_count: u32) -> usize {
        (page_count as usize).div_ceil(self.config.thumbs_per_gallery_page)
    }
}

#[async_trait]
impl GalleryAdapter for EhentaiAdapter {
    fn name(&self) -> &'static str {
        "E-Hentai"
    }

    fn source(&self) -> &'static str {
        "e-hentai"
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
        let mut page_urls = Vec::with_capacity(page_count as usize);

        for gallery_page in 0..self.gallery_page_count(page_count) {
            let page_url = format!("{}?p={}", url, gallery_page);
            let doc = self.fetch_page(&page_url).await?;
            page_urls.extend(self.extract_thumb_links(&doc, url));
        }

        // The final gallery page may list more thumbnails than the gallery
        // reports; keep exactly page_count entries.
        page_urls.truncate(page_count as usize);
        Ok(page_urls)
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
