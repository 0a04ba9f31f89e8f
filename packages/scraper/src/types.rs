//! Core data types for the scraper.
//!
//! Every value is kept as the display string shown on volby.cz; numbers are
//! never parsed.

use crate::config::FIXED_COLUMNS;

/// One municipality row of a district index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Municipality {
    /// Numeric municipality code (e.g. "534421").
    pub code: String,

    /// Display name (e.g. "Byšice").
    pub name: String,

    /// Absolute URL of the detail page, if the code cell carries a link.
    pub detail_url: Option<String>,
}

impl Municipality {
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            detail_url: None,
        }
    }

    #[must_use]
    pub fn with_detail_url(mut self, url: impl Into<String>) -> Self {
        self.detail_url = Some(url.into());
        self
    }
}

/// Figures scraped from one municipality detail page.
///
/// Scalar figures are `None` when the page lacks the corresponding cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailPage {
    pub registered_voters: Option<String>,
    pub envelopes_issued: Option<String>,
    pub valid_votes: Option<String>,

    /// Party names in page order, trimmed.
    pub parties: Vec<String>,

    /// Per-party vote totals in page order.
    pub votes: Vec<String>,
}

impl DetailPage {
    /// Names of the scalar figures missing from this page.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("registered_voters", &self.registered_voters),
            ("envelopes_issued", &self.envelopes_issued),
            ("valid_votes", &self.valid_votes),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// One output row: fixed municipality columns followed by party vote totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub code: String,
    pub name: String,
    pub registered_voters: String,
    pub envelopes_issued: String,
    pub valid_votes: String,
    pub votes: Vec<String>,
}

impl Row {
    /// Flatten the row into CSV fields.
    #[must_use]
    pub fn to_record(&self) -> Vec<&str> {
        let mut record = vec![
            self.code.as_str(),
            self.name.as_str(),
            self.registered_voters.as_str(),
            self.envelopes_issued.as_str(),
            self.valid_votes.as_str(),
        ];
        record.extend(self.votes.iter().map(String::as_str));
        record
    }
}

/// Ordered, deduplicated list of party names across a district.
///
/// The first occurrence of a name fixes its column position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyRoster {
    names: Vec<String>,
}

impl PartyRoster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the names not seen before, keeping their order.
    pub fn merge<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if !self.names.iter().any(|n| n == name) {
                self.names.push(name.to_string());
            }
        }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The consolidated result of a district scrape: header plus rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultTable {
    /// Build a table whose header is the fixed columns followed by the roster.
    #[must_use]
    pub fn new(roster: &PartyRoster, rows: Vec<Row>) -> Self {
        let header = FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(roster.names().iter().cloned())
            .collect();
        Self { header, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_dedupes_in_encounter_order() {
        let mut roster = PartyRoster::new();
        roster.merge(["ODS", "ANO 2011", "Piráti"]);
        roster.merge(["ANO 2011", "SPD", "ODS"]);

        assert_eq!(roster.names(), &["ODS", "ANO 2011", "Piráti", "SPD"]);
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_result_table_header() {
        let mut roster = PartyRoster::new();
        roster.merge(["PartyA", "PartyB"]);
        let table = ResultTable::new(&roster, Vec::new());

        assert_eq!(
            table.header,
            vec![
                "Kód obce",
                "Název obce",
                "Voliči v seznamu",
                "Vydané obálky",
                "Platné hlasy",
                "PartyA",
                "PartyB"
            ]
        );
    }

    #[test]
    fn test_row_to_record() {
        let row = Row {
            code: "001".to_string(),
            name: "Town A".to_string(),
            registered_voters: "500".to_string(),
            envelopes_issued: "300".to_string(),
            valid_votes: "290".to_string(),
            votes: vec!["150".to_string(), "140".to_string()],
        };
        assert_eq!(
            row.to_record(),
            vec!["001", "Town A", "500", "300", "290", "150", "140"]
        );
    }

    #[test]
    fn test_detail_page_missing_fields() {
        let page = DetailPage {
            registered_voters: Some("500".to_string()),
            ..DetailPage::default()
        };
        assert_eq!(page.missing_fields(), vec!["envelopes_issued", "valid_votes"]);
    }
}
