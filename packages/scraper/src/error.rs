//! Error types for the scraper.
//!
//! Extraction shortfalls (a missing table cell) are not errors: extractors
//! simply return fewer values. Everything here aborts a run.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the scraper library.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// Wrong number of command-line arguments.
    #[error("Wrong arguments: {0}\nUsage: volby-scraper <DISTRICT_URL> <OUTPUT_FILE>")]
    WrongArgumentCount(String),

    /// District URL without an http(s) scheme.
    #[error("Invalid district URL: '{0}'. The first argument must start with http:// or https://")]
    InvalidUrl(String),

    /// Output file name without the `.csv` extension.
    #[error("Invalid output file: '{0}'. The second argument must be a file name ending in .csv")]
    InvalidOutputFile(String),

    /// HTTP client could not be built.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Downloading a page failed (transport error or non-success status).
    #[error("Failed to download {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A link on the index page could not be resolved to an absolute URL.
    #[error("Invalid link '{href}': {source}")]
    InvalidLink {
        href: String,
        #[source]
        source: url::ParseError,
    },

    /// Writing the output file failed.
    #[error("Failed to save data to file {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization error.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, ScraperError>;
