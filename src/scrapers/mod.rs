//! Gallery adapter trait and common types for site scrapers.
//!
//! This module defines the interface that all site adapters must implement,
//! along with the shared image-resolution loop that feeds the archive
//! writer. The writer depends only on this interface, never on any site's
//! markup.

mod ehentai;
mod nhentai;

pub use ehentai::EhentaiAdapter;
pub use nhentai::NhentaiAdapter;

use crate::console::Console;
use crate::error::ScraperError;
use async_trait::async_trait;
use std::time::Duration;

/// Metadata scraped from a gallery landing page.
#[derive(Debug, Clone)]
pub struct GalleryInfo {
    /// The gallery's title.
    pub title: String,

    /// Total number of pages the landing page reports.
    pub page_count: u32,
}

/// Result of the image-resolution loop.
///
/// Resolution is best-effort: the first per-page failure terminates the
/// loop early, and whatever was accumulated so far still gets archived.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Full-resolution image URLs in page order.
    pub urls: Vec<String>,

    /// True if a per-page failure cut the loop short.
    pub stopped_early: bool,
}

/// Trait for gallery site adapters.
///
/// Each adapter handles one site (e-hentai, nhentai) and provides methods
/// to fetch gallery metadata, enumerate per-page URLs, and resolve each
/// page to its full-resolution image URL.
#[async_trait]
pub trait GalleryAdapter: Send + Sync {
    /// Returns the human-readable name of this adapter.
    fn name(&self) -> &'static str;

    /// Returns the source label recorded as the manifest author.
    fn source(&self) -> &'static str;

    /// Checks if this adapter can handle the given URL.
    fn can_handle(&self, url: &str) -> bool;

    /// Fetches gallery metadata from the landing page.
    async fn fetch_info(&self, url: &str) -> Result<GalleryInfo, ScraperError>;

    /// Enumerates the per-page URLs for a gallery, in page order.
    async fn enumerate_page_urls(
        &self,
        url: &str,
        page_count: u32,
    ) -> Result<Vec<String>, ScraperError>;

    /// Resolves a single page to its full-resolution image URL.
    async fn resolve_image_url(&self, page_url: &str) -> Result<String, ScraperError>;
}

/// Registry of available adapters.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn GalleryAdapter>>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterRegistry {
    /// Creates a new registry with all available adapters.
    pub fn new() -> Self {
        let adapters: Vec<Box<dyn GalleryAdapter>> = vec![
            Box::new(EhentaiAdapter::default()),
            Box::new(NhentaiAdapter::default()),
        ];

        Self { adapters }
    }

    /// Finds an adapter that can handle the given URL.
    pub fn find_for_url(&self, url: &str) -> Option<&dyn GalleryAdapter> {
        self.adapters
            .iter()
            .find(|a| a.can_handle(url))
            .map(|a| a.as_ref())
    }

    /// Returns all registered adapters.
    pub fn all(&self) -> &[Box<dyn GalleryAdapter>] {
        &self.adapters
    }
}

/// Resolves each per-page URL to its full image URL, stopping at the first
/// failure.
///
/// The failure is logged with the offending page URL, the loop terminates
/// without visiting the remaining pages, and the URLs accumulated so far
/// are returned with `stopped_early` set. Skip-and-continue is deliberately
/// not attempted.
pub async fn resolve_image_urls(
    adapter: &dyn GalleryAdapter,
    page_urls: &[String],
    console: &Console,
) -> Resolution {
    let total = page_urls.len();
    let mut urls = Vec::with_capacity(total);

    for (idx, page_url) in page_urls.iter().enumerate() {
        console.step(&format!(
            "{} Fetching full image URL...",
            console.page_info(idx + 1, total)
        ));

        match adapter.resolve_image_url(page_url).await {
            Ok(url) => urls.push(url),
            Err(e) => {
                console.error(&format!("Failed on {}: {}", page_url, e));
                return Resolution {
                    urls,
                    stopped_early: true,
                };
            }
        }
    }

    Resolution {
        urls,
        stopped_early: false,
    }
}

/// Common HTTP client configuration for adapters.
pub fn create_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent("Mozilla/5.0")
        .cookie_store(true)
        .timeout(Duration::from_secs(30))
        .build()
}

/// Applies the fixed courtesy delay between requests.
pub async fn rate_limit(delay_sec: f64) {
    if delay_sec > 0.0 {
        tokio::time::sleep(Duration::from_secs_f64(delay_sec)).await;
    }
}

/// Resolves a possibly-relative href against a base URL.
pub fn resolve_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    if let Ok(base_url) = url::Url::parse(base)
        && let Ok(resolved) = base_url.join(href)
    {
        return resolved.to_string();
    }

    // Simple join for anything url can't handle
    let base = base.trim_end_matches('/');
    format!("{}/{}", base, href.trim_start_matches('/'))
}
