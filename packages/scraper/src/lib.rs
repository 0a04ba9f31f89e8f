//! Volby scraper - Czech parliamentary election results per district.
//!
//! This crate downloads the results of every municipality in one electoral
//! district from volby.cz and writes them to a CSV file with one row per
//! municipality and one column per party.
//!
//! # Example
//!
//! ```
//! use volby_scraper::config;
//!
//! // Validate arguments before any network activity
//! assert!(config::validate_district_url("https://www.volby.cz/pls/ps2017nss/ps32").is_ok());
//! assert!(config::validate_output_file("vysledky_melnik.csv").is_ok());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, argument validation and runtime settings
//! - [`error`]: Error types and Result alias
//! - [`http`]: Page fetching over blocking HTTP
//! - [`html`]: HTML selection and text normalization helpers
//! - [`extract`]: Field extractors for index and detail pages
//! - [`types`]: Municipalities, detail figures, rows and the party roster
//! - [`aggregate`]: District scrape and keyed row assembly
//! - [`export`]: CSV output
//! - [`cli`]: Command-line interface

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod html;
pub mod http;
pub mod types;

// Re-export main functions
pub use aggregate::{assemble_table, scrape_district};
pub use export::{save_csv, write_csv};

// Re-export commonly used items
pub use config::{validate_district_url, validate_output_file};
pub use error::{Result, ScraperError};
pub use types::{DetailPage, Municipality, PartyRoster, ResultTable, Row};
