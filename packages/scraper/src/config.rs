//! Configuration constants and validation functions for the scraper.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, ScraperError};

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default CSV field delimiter.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Environment variable overriding the CSV delimiter.
pub const DELIMITER_ENV: &str = "VOLBY_CSV_DELIMITER";

/// Column labels preceding the party columns in the output header.
pub const FIXED_COLUMNS: [&str; 5] = [
    "Kód obce",
    "Název obce",
    "Voliči v seznamu",
    "Vydané obálky",
    "Platné hlasy",
];

/// District URL pattern: must carry an http or https scheme.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("valid regex"));

/// Validate the district results URL.
///
/// Only the scheme prefix is checked; anything past it is left to the
/// HTTP client.
///
/// # Examples
/// ```
/// use volby_scraper::config::validate_district_url;
///
/// assert!(validate_district_url("https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ").is_ok());
/// assert!(validate_district_url("www.volby.cz").is_err());
/// ```
pub fn validate_district_url(url: &str) -> Result<()> {
    if URL_PATTERN.is_match(url) {
        Ok(())
    } else {
        Err(ScraperError::InvalidUrl(url.to_string()))
    }
}

/// Validate the output file name (must end in `.csv`).
///
/// # Examples
/// ```
/// use volby_scraper::config::validate_output_file;
///
/// assert!(validate_output_file("vysledky_melnik.csv").is_ok());
/// assert!(validate_output_file("vysledky_melnik.txt").is_err());
/// ```
pub fn validate_output_file(file_name: &str) -> Result<()> {
    if file_name.ends_with(".csv") {
        Ok(())
    } else {
        Err(ScraperError::InvalidOutputFile(file_name.to_string()))
    }
}

/// Runtime settings that are not part of the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// CSV field delimiter.
    pub delimiter: u8,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl ScraperConfig {
    /// Read settings from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var(DELIMITER_ENV) {
            Ok(value) => Ok(Self::default().with_delimiter(parse_delimiter(&value)?)),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Parse a delimiter setting. Only `;` and `,` are accepted.
pub fn parse_delimiter(value: &str) -> Result<u8> {
    match value.trim() {
        ";" => Ok(b';'),
        "," => Ok(b','),
        other => Err(ScraperError::Config(format!(
            "{DELIMITER_ENV} must be ';' or ',', got '{other}'"
        ))),
    }
}
