//! cbwgen - web comic archive (.cbw) generator.
//!
//! This library provides functionality for:
//! - Scraping image galleries from supported sites (e-hentai, nhentai)
//! - Resolving each gallery page to its full-resolution image URL
//! - Packaging the resolved URLs into a single-entry `.cbw` zip archive

pub mod archive;
pub mod config;
pub mod console;
pub mod error;
pub mod manifest;
pub mod scrapers;

// Re-export commonly used types
pub use config::ScrapeConfig;
pub use console::Console;
pub use error::{ArchiveError, ScraperError};
pub use manifest::Manifest;
pub use scrapers::{AdapterRegistry, GalleryAdapter, GalleryInfo, Resolution};
