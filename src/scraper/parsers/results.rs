//! Stage and one-day race result parser for procyclingstats.com.
//!
//! Reads the top finishers from the first `table.results` on the page.
//! URL: https://www.procyclingstats.com/race/RACE/YEAR/STAGE

use scraper::{ElementRef, Html, Selector};

use crate::types::FinisherResult;

/// Number of finishers read when the caller does not say otherwise
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Column holding the finishing position
const RANK_COLUMN: usize = 0;
/// Column holding the rider name
const NAME_COLUMN: usize = 3;

/// Parser for result pages
pub struct ResultsParser;

impl ResultsParser {
    /// Parse a raw results page
    pub fn parse(html: &str, max_results: usize) -> Vec<FinisherResult> {
        let document = Html::parse_document(html);
        Self::extract(&document, max_results)
    }

    /// Extract up to `max_results` ranked finishers from a parsed results page.
    ///
    /// A page without a results table yields nothing. Rows that are too short
    /// or whose rank is not a plain number (DNF, DNS, OTL...) are skipped, but
    /// still count towards `max_results`.
    pub fn extract(document: &Html, max_results: usize) -> Vec<FinisherResult> {
        let table_selector = Selector::parse("table.results").unwrap();
        let row_selector = Selector::parse("tr").unwrap();

        let Some(table) = document.select(&table_selector).next() else {
            return Vec::new();
        };

        table
            .select(&row_selector)
            .skip(1) // header
            .take(max_results)
            .filter_map(|row| Self::parse_row(&row))
            .collect()
    }

    fn parse_row(row: &ElementRef) -> Option<FinisherResult> {
        let td_selector = Selector::parse("td").unwrap();
        let cells: Vec<_> = row.select(&td_selector).collect();

        if cells.len() <= NAME_COLUMN {
            return None;
        }

        let rank_text = cell_text(&cells[RANK_COLUMN]);
        let rank = parse_rank(&rank_text)?;
        let rider_name = cell_text(&cells[NAME_COLUMN]);

        Some(FinisherResult { rider_name, rank })
    }
}

/// Cell text with non-breaking spaces turned into plain spaces, trimmed
fn cell_text(cell: &ElementRef) -> String {
    cell.text()
        .collect::<String>()
        .replace('\u{a0}', " ")
        .trim()
        .to_string()
}

fn parse_rank(text: &str) -> Option<u32> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
