//! Command-line interface for the scraper.

use std::path::Path;

use clap::error::ErrorKind;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::aggregate::{scrape_district, ScrapeProgress};
use crate::config::{validate_district_url, validate_output_file, ScraperConfig, FIXED_COLUMNS};
use crate::error::{Result, ScraperError};
use crate::export::save_csv;
use crate::http::HttpSource;
use crate::types::Municipality;

/// Scrape Czech parliamentary election results of one district into CSV.
#[derive(Debug, Parser)]
#[command(name = "volby-scraper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// District results page (e.g. https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2106)
    #[arg(allow_hyphen_values = true)]
    pub district_url: String,

    /// Output file name ending in .csv
    #[arg(allow_hyphen_values = true)]
    pub output_file: String,
}

impl Cli {
    /// Parse arguments, mapping usage errors to [`ScraperError`].
    ///
    /// `--help` and `--version` print and exit with status 0.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => Err(ScraperError::WrongArgumentCount(
                e.kind()
                    .as_str()
                    .unwrap_or("invalid arguments")
                    .to_string(),
            )),
        }
    }

    /// Check both arguments before any network activity.
    pub fn validate(&self) -> Result<()> {
        validate_district_url(&self.district_url)?;
        validate_output_file(&self.output_file)?;
        Ok(())
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::try_parse_args(std::env::args_os())?;
    cli.validate()?;
    let config = ScraperConfig::from_env()?;

    scrape_command(&cli.district_url, Path::new(&cli.output_file), &config)
}

/// Indicatif progress bar over the detail pages.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl ScrapeProgress for BarProgress {
    fn start(&self, total: usize) {
        self.bar.set_length(total as u64);
        #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .expect("valid template")
                .progress_chars("=> "),
        );
        self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
    }

    fn advance(&self, municipality: &Municipality) {
        self.bar.set_message(municipality.name.clone());
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Execute the scrape and save the result.
fn scrape_command(district_url: &str, output: &Path, config: &ScraperConfig) -> Result<()> {
    println!(
        "{} {}",
        style("Downloading data from selected URL:").bold(),
        style(district_url).cyan()
    );

    let source = HttpSource::new()?;
    let progress = BarProgress::new();

    let table = match scrape_district(&source, district_url, &progress) {
        Ok(table) => table,
        Err(e) => {
            progress.bar.finish_and_clear();
            return Err(e);
        }
    };

    println!("  Municipalities: {}", table.rows.len());
    println!("  Parties: {}", table.header.len().saturating_sub(FIXED_COLUMNS.len()));

    save_csv(output, &table, config.delimiter)?;
    println!(
        "{} {}",
        style("Saving data to file:").bold(),
        style(output.display()).green()
    );

    println!("{} volby-scraper", style("Finished").green().bold());
    Ok(())
}
