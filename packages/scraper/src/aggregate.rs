//! District scrape: ties fetching, extraction and row assembly together.

use url::Url;

use crate::error::{Result, ScraperError};
use crate::extract::{detail_page, municipalities};
use crate::http::{fetch_document, PageSource};
use crate::types::{DetailPage, Municipality, PartyRoster, ResultTable, Row};

/// Progress callbacks for a district scrape.
///
/// All methods have empty defaults so implementors override only what they
/// display.
pub trait ScrapeProgress {
    /// The index page was parsed and `total` detail pages will be fetched.
    fn start(&self, _total: usize) {}

    /// A detail page was fetched and extracted.
    fn advance(&self, _municipality: &Municipality) {}

    /// All detail pages were processed.
    fn finish(&self) {}
}

/// Progress sink that reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ScrapeProgress for NoProgress {}

/// Scrape every municipality of a district.
///
/// Fetches the index page at `district_url`, then each linked detail page
/// exactly once. Any fetch failure aborts the whole scrape.
///
/// # Arguments
/// * `source` - Where pages come from (network or test double)
/// * `district_url` - Absolute URL of the district index page; detail links
///   are resolved against it
/// * `progress` - Progress sink
///
/// # Returns
/// The assembled [`ResultTable`]
pub fn scrape_district<S, P>(source: &S, district_url: &str, progress: &P) -> Result<ResultTable>
where
    S: PageSource + ?Sized,
    P: ScrapeProgress + ?Sized,
{
    let base = Url::parse(district_url).map_err(|source| ScraperError::InvalidLink {
        href: district_url.to_string(),
        source,
    })?;

    let index = fetch_document(source, district_url)?;
    let found = municipalities(&index, &base);
    drop(index);

    let (linked, unlinked): (Vec<_>, Vec<_>) =
        found.into_iter().partition(|m| m.detail_url.is_some());
    for m in &unlinked {
        tracing::debug!(code = %m.code, name = %m.name, "Index row without detail link, skipping");
    }
    tracing::info!(municipalities = linked.len(), "Parsed district index page");

    progress.start(linked.len());
    let mut pages = Vec::with_capacity(linked.len());
    for municipality in &linked {
        if let Some(url) = municipality.detail_url.as_deref() {
            let doc = fetch_document(source, url)?;
            pages.push(detail_page(&doc));
        }
        progress.advance(municipality);
    }
    progress.finish();

    Ok(assemble_table(&linked, pages))
}

/// Join municipalities with their detail pages into a [`ResultTable`].
///
/// `pages[i]` belongs to `municipalities[i]`; the pairing is by municipality,
/// so a page missing a figure drops only its own municipality. Party names
/// from every page feed the roster, including pages that were dropped.
pub fn assemble_table(municipalities: &[Municipality], pages: Vec<DetailPage>) -> ResultTable {
    let mut roster = PartyRoster::new();
    let mut rows = Vec::with_capacity(pages.len());

    for (municipality, page) in municipalities.iter().zip(pages) {
        roster.merge(&page.parties);

        if page.votes.len() != page.parties.len() {
            tracing::warn!(
                code = %municipality.code,
                parties = page.parties.len(),
                votes = page.votes.len(),
                "Party and vote counts differ"
            );
        }

        match build_row(municipality, page) {
            Ok(row) => rows.push(row),
            Err(missing) => tracing::warn!(
                code = %municipality.code,
                name = %municipality.name,
                missing = ?missing,
                "Detail page incomplete, municipality dropped"
            ),
        }
    }

    tracing::info!(rows = rows.len(), parties = roster.len(), "Assembled result table");
    ResultTable::new(&roster, rows)
}

/// Build a row, or report which figures the page lacks.
fn build_row(
    municipality: &Municipality,
    page: DetailPage,
) -> std::result::Result<Row, Vec<&'static str>> {
    let missing = page.missing_fields();
    match (page.registered_voters, page.envelopes_issued, page.valid_votes) {
        (Some(registered_voters), Some(envelopes_issued), Some(valid_votes)) => Ok(Row {
            code: municipality.code.clone(),
            name: municipality.name.clone(),
            registered_voters,
            envelopes_issued,
            valid_votes,
            votes: page.votes,
        }),
        _ => Err(missing),
    }
}
