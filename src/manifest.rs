//! The `.cbw` manifest document.
//!
//! A `.cbw` archive holds a single `manifest.toml` entry describing the
//! gallery: a `[meta]` table with title and author, and a `[pages]` table
//! with the ordered list of full-resolution image URLs. This module is the
//! schema other tools parse, so it round-trips exactly through TOML.

use serde::{Deserialize, Serialize};

/// Gallery metadata stored under the `[meta]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Gallery title as scraped from the landing page.
    pub title: String,

    /// Source site label (e.g. "e-hentai", "nhentai").
    pub author: String,
}

/// Page list stored under the `[pages]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pages {
    /// Absolute image URLs in page order. May be empty if resolution
    /// failed on the very first page.
    pub urls: Vec<String>,
}

/// The manifest document persisted inside a `.cbw` archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub meta: Meta,
    pub pages: Pages,
}

impl Manifest {
    /// Builds a manifest from a title, a source label, and the resolved
    /// image URLs in page order.
    pub fn new(title: impl Into<String>, author: impl Into<String>, urls: Vec<String>) -> Self {
        Self {
            meta: Meta {
                title: title.into(),
                author: author.into(),
            },
            pages: Pages { urls },
        }
    }

    /// Serializes the manifest to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Parses a manifest from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let manifest = Manifest::new(
            "Some Gallery",
            "e-hentai",
            vec![
                "https://example.com/img/1.jpg".to_string(),
                "https://example.com/img/2.jpg".to_string(),
            ],
        );

        let toml = manifest.to_toml().unwrap();
        let parsed = Manifest::from_toml(&toml).unwrap();
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn test_empty_url_list() {
        let manifest = Manifest::new("Empty", "nhentai", Vec::new());
        let toml = manifest.to_toml().unwrap();
        let parsed = Manifest::from_toml(&toml).unwrap();
        assert_eq!(parsed.pages.urls.len(), 0);
    }

    #[test]
    fn test_url_order_preserved() {
        let urls: Vec<String> = (1..=20)
            .map(|i| format!("https://example.com/img/{}.png", i))
            .collect();
        let manifest = Manifest::new("Ordered", "e-hentai", urls.clone());
        let parsed = Manifest::from_toml(&manifest.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.pages.urls, urls);
    }

    #[test]
    fn test_title_with_special_characters() {
        let manifest = Manifest::new("Title \"with\" quotes\nand newline", "nhentai", Vec::new());
        let parsed = Manifest::from_toml(&manifest.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.meta.title, "Title \"with\" quotes\nand newline");
    }

    #[test]
    fn test_toml_layout() {
        let manifest = Manifest::new("T", "a", vec!["u".to_string()]);
        let toml = manifest.to_toml().unwrap();
        assert!(toml.contains("[meta]"));
        assert!(toml.contains("[pages]"));
    }
}
