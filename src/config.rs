//! Scraping configuration for cbwgen.
//!
//! There is no config file and no environment variables: the CLI surface is
//! two positional arguments. What used to be inline magic numbers (request
//! delays, thumbnail batch size) lives here as an explicit struct so the
//! adapters receive their constants from one place and tests can override
//! them.

use serde::{Deserialize, Serialize};

/// Inter-request courtesy delay for the paginated-grid site, in seconds.
const EHENTAI_DELAY_SEC: f64 = 0.5;

/// Inter-request courtesy delay for the path-substitution site, in seconds.
const NHENTAI_DELAY_SEC: f64 = 0.25;

/// Thumbnails shown per gallery page on the paginated-grid site.
const THUMBS_PER_GALLERY_PAGE: usize = 40;

/// Web scraping configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Delay between web requests in seconds. A fixed courtesy rate limit,
    /// not an adaptive backoff policy.
    pub delay_between_requests_sec: f64,

    /// Number of thumbnails per gallery page for paginated sites.
    pub thumbs_per_gallery_page: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            delay_between_requests_sec: EHENTAI_DELAY_SEC,
            thumbs_per_gallery_page: THUMBS_PER_GALLERY_PAGE,
        }
    }
}

impl ScrapeConfig {
    /// Configuration for the e-hentai adapter.
    pub fn ehentai() -> Self {
        Self {
            delay_between_requests_sec: EHENTAI_DELAY_SEC,
            ..Self::default()
        }
    }

    /// Configuration for the nhentai adapter.
    pub fn nhentai() -> Self {
        Self {
            delay_between_requests_sec: NHENTAI_DELAY_SEC,
            ..Self::default()
        }
    }

    /// Returns a copy with the request delay disabled, for tests.
    pub fn without_delay(mut self) -> Self {
        self.delay_between_requests_sec = 0.0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScrapeConfig::default();
        assert_eq!(config.delay_between_requests_sec, 0.5);
        assert_eq!(config.thumbs_per_gallery_page, 40);
    }

    #[test]
    fn test_per_site_delays() {
        assert_eq!(ScrapeConfig::ehentai().delay_between_requests_sec, 0.5);
        assert_eq!(ScrapeConfig::nhentai().delay_between_requests_sec, 0.25);
    }

    #[test]
    fn test_without_delay() {
        let config = ScrapeConfig::ehentai().without_delay();
        assert_eq!(config.delay_between_requests_sec, 0.0);
        assert_eq!(config.thumbs_per_gallery_page, 40);
    }
}
