//! Error types for the cbwgen application.
//!
//! Uses `thiserror` for structured error definitions that provide
//! clear context about what went wrong.

use thiserror::Error;

/// Main error type for scraping operations.
#[derive(Error, Debug)]
pub enum ScraperError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to parse page content
    #[error("Failed to parse page: {0}")]
    ParseError(String),

    /// The required element isn't found in HTML
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// URL parsing or validation failed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The adapter doesn't support this URL
    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),
}

/// Error type for archive read/write operations.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Filesystem I/O failed
    #[error("Archive I/O failed: {0}")]
    IoError(#[from] std::io::Error),

    /// Zip container operation failed
    #[error("Zip error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Failed to serialize the manifest to TOML
    #[error("Failed to serialize manifest: {0}")]
    SerializeError(String),

    /// Failed to parse a manifest read back from an archive
    #[error("Failed to parse manifest: {0}")]
    ParseError(String),

    /// The archive has no manifest entry
    #[error("Archive contains no manifest.toml entry")]
    MissingManifest,
}

/// Result type alias using anyhow for application-level error handling.
pub type Result<T> = anyhow::Result<T>;
