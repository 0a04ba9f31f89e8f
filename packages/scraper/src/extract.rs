//! Field extractors for volby.cz district and municipality pages.
//!
//! All extractors are infallible: a cell that does not match the expected
//! marker is simply absent from the result, so lists for different
//! categories may differ in length.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::html::{cell_text, has_headers, select_texts, select_trimmed_texts, selector};
use crate::types::{DetailPage, Municipality};

/// Name cells: municipality names on the index page, party names on detail pages.
static NAME_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.overflow_name"));

/// Code cells: municipality codes (and their links) on the index page.
static CODE_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.cislo"));

static CODE_LINK: LazyLock<Selector> = LazyLock::new(|| selector("td.cislo > a[href]"));

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

static TABLE_ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));

static REGISTERED_VOTERS: LazyLock<Selector> = LazyLock::new(|| selector(r#"td[headers~="sa2"]"#));

static ENVELOPES_ISSUED: LazyLock<Selector> = LazyLock::new(|| selector(r#"td[headers~="sa3"]"#));

static VALID_VOTES: LazyLock<Selector> = LazyLock::new(|| selector(r#"td[headers~="sa6"]"#));

/// `headers` values of the vote-total column in the two party tables of a
/// detail page.
pub const VOTE_RESULT_HEADERS: [&str; 2] = ["t1sa2 t1sb3", "t2sa2 t2sb3"];

// Index page

/// Municipality names, trimmed.
pub fn municipality_names(doc: &Html) -> Vec<String> {
    select_trimmed_texts(doc, &NAME_CELL)
}

/// Municipality codes, including placeholder cells without a link.
pub fn municipality_codes(doc: &Html) -> Vec<String> {
    select_texts(doc, &CODE_CELL)
}

/// Absolute detail-page URLs for every code cell that carries a link.
///
/// Links that cannot be resolved against `base` are skipped.
pub fn detail_urls(doc: &Html, base: &Url) -> Vec<String> {
    doc.select(&CODE_LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| resolve_link(base, href))
        .collect()
}

/// Municipalities of the index page, pairing code, name and link per table row.
///
/// Rows without both a code cell and a name cell (headers, spacers) are
/// ignored. Placeholder rows keep `detail_url: None`.
pub fn municipalities(doc: &Html, base: &Url) -> Vec<Municipality> {
    doc.select(&TABLE_ROW)
        .filter_map(|row| {
            let code_cell = row.select(&CODE_CELL).next()?;
            let name_cell = row.select(&NAME_CELL).next()?;

            let municipality = Municipality::new(
                cell_text(code_cell),
                cell_text(name_cell).trim().to_string(),
            );
            let link = code_cell
                .select(&ANCHOR)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| resolve_link(base, href));
            Some(match link {
                Some(url) => municipality.with_detail_url(url),
                None => municipality,
            })
        })
        .collect()
}

fn resolve_link(base: &Url, href: &str) -> Option<String> {
    match base.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            tracing::warn!(href, error = %e, "Skipping unresolvable link");
            None
        }
    }
}

// Detail page

/// Registered voter counts (`headers="sa2"`).
pub fn registered_voters(doc: &Html) -> Vec<String> {
    select_texts(doc, &REGISTERED_VOTERS)
}

/// Issued envelope counts (`headers="sa3"`).
pub fn envelopes_issued(doc: &Html) -> Vec<String> {
    select_texts(doc, &ENVELOPES_ISSUED)
}

/// Valid vote counts (`headers="sa6"`).
pub fn valid_votes(doc: &Html) -> Vec<String> {
    select_texts(doc, &VALID_VOTES)
}

/// Party names in page order, trimmed.
pub fn party_names(doc: &Html) -> Vec<String> {
    select_trimmed_texts(doc, &NAME_CELL)
}

/// Vote totals of every party, in page order.
pub fn vote_results(doc: &Html) -> Vec<String> {
    doc.select(&CODE_CELL)
        .filter(|cell| has_headers(*cell, &VOTE_RESULT_HEADERS))
        .map(cell_text)
        .collect()
}

/// Run every detail extractor against one parsed page.
pub fn detail_page(doc: &Html) -> DetailPage {
    DetailPage {
        registered_voters: registered_voters(doc).into_iter().next(),
        envelopes_issued: envelopes_issued(doc).into_iter().next(),
        valid_votes: valid_votes(doc).into_iter().next(),
        parties: party_names(doc),
        votes: vote_results(doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"<html><body>
<table class="table">
  <tr><th id="t1sa1" colspan="2">Obec</th><th id="t1sa2">Výběr okrsku</th></tr>
  <tr><th id="t1sb1">číslo</th><th id="t1sb2">název</th></tr>
  <tr>
    <td class="cislo" headers="t1sa1 t1sb1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=534421&amp;xvyber=2106">534421</a></td>
    <td class="overflow_name" headers="t1sa1 t1sb2">Byšice</td>
    <td class="center" headers="t1sa2"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=534421&amp;xvyber=2106">X</a></td>
  </tr>
  <tr>
    <td class="cislo" headers="t1sa1 t1sb1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=534676&amp;xvyber=2106">534676</a></td>
    <td class="overflow_name" headers="t1sa1 t1sb2">Dobřeň</td>
    <td class="center" headers="t1sa2"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=534676&amp;xvyber=2106">X</a></td>
  </tr>
  <tr>
    <td class="cislo" headers="t1sa1 t1sb1">-</td>
    <td class="overflow_name" headers="t1sa1 t1sb2">-</td>
    <td class="center" headers="t1sa2">-</td>
  </tr>
</table>
</body></html>"#;

    const DETAIL: &str = r#"<html><body>
<table id="ps311_t1">
  <tr>
    <td class="cislo" headers="sa2" data-rel="L1">1&nbsp;058</td>
    <td class="cislo" headers="sa3" data-rel="L1">720</td>
    <td class="cislo" headers="sa6" data-rel="L1">716</td>
  </tr>
</table>
<table>
  <tr>
    <td class="cislo" headers="t1sa1 t1sb1">1</td>
    <td class="overflow_name" headers="t1sa1 t1sb2">Občanská demokratická strana</td>
    <td class="cislo" headers="t1sa2 t1sb3">109</td>
    <td class="cislo" headers="t1sa2 t1sb4">15,22</td>
  </tr>
  <tr>
    <td class="cislo" headers="t1sa1 t1sb1">2</td>
    <td class="overflow_name" headers="t1sa1 t1sb2"> Řád národa - Vlastenecká unie </td>
    <td class="cislo" headers="t1sa2 t1sb3">0</td>
    <td class="cislo" headers="t1sa2 t1sb4">0,00</td>
  </tr>
</table>
<table>
  <tr>
    <td class="cislo" headers="t2sa1 t2sb1">15</td>
    <td class="overflow_name" headers="t2sa1 t2sb2">Česká pirátská strana</td>
    <td class="cislo" headers="t2sa2 t2sb3">1&nbsp;020</td>
    <td class="cislo" headers="t2sa2 t2sb4">11,45</td>
  </tr>
</table>
</body></html>"#;

    fn base() -> Url {
        Url::parse("https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2106")
            .unwrap()
    }

    #[test]
    fn test_municipality_names_and_codes() {
        let doc = Html::parse_document(INDEX);
        assert_eq!(municipality_names(&doc), vec!["Byšice", "Dobřeň", "-"]);
        assert_eq!(municipality_codes(&doc), vec!["534421", "534676", "-"]);
    }

    #[test]
    fn test_detail_urls_skip_unlinked_cells() {
        let doc = Html::parse_document(INDEX);
        let urls = detail_urls(&doc, &base());
        assert_eq!(
            urls,
            vec![
                "https://www.volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=2&xobec=534421&xvyber=2106",
                "https://www.volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=2&xobec=534676&xvyber=2106",
            ]
        );
    }

    #[test]
    fn test_municipalities_pairs_rows() {
        let doc = Html::parse_document(INDEX);
        let found = municipalities(&doc, &base());

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].code, "534421");
        assert_eq!(found[0].name, "Byšice");
        assert!(found[0]
            .detail_url
            .as_deref()
            .unwrap()
            .ends_with("xobec=534421&xvyber=2106"));
        assert_eq!(found[2].code, "-");
        assert_eq!(found[2].detail_url, None);
    }

    #[test]
    fn test_detail_scalars_normalize_nbsp() {
        let doc = Html::parse_document(DETAIL);
        assert_eq!(registered_voters(&doc), vec!["1 058"]);
        assert_eq!(envelopes_issued(&doc), vec!["720"]);
        assert_eq!(valid_votes(&doc), vec!["716"]);
    }

    #[test]
    fn test_party_names_trimmed() {
        let doc = Html::parse_document(DETAIL);
        assert_eq!(
            party_names(&doc),
            vec![
                "Občanská demokratická strana",
                "Řád národa - Vlastenecká unie",
                "Česká pirátská strana"
            ]
        );
    }

    #[test]
    fn test_vote_results_only_vote_column() {
        let doc = Html::parse_document(DETAIL);
        assert_eq!(vote_results(&doc), vec!["109", "0", "1 020"]);
    }

    #[test]
    fn test_detail_page_missing_cell() {
        let html = DETAIL.replace(r#"<td class="cislo" headers="sa6" data-rel="L1">716</td>"#, "");
        let doc = Html::parse_document(&html);
        let page = detail_page(&doc);

        assert_eq!(page.registered_voters.as_deref(), Some("1 058"));
        assert_eq!(page.valid_votes, None);
        assert_eq!(page.votes.len(), 3);
    }
}
