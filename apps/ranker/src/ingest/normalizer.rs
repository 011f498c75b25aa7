//! Text Normalizer: canonical form for free-text candidate fields.
//!
//! lowercase → strip markup → keep `[a-z0-9]` and whitespace → collapse →
//! keep the first occurrence of every word.
//!
//! The output contains only lowercase ASCII alphanumerics separated by single
//! spaces, so normalizing it again is a no-op.

use std::collections::HashSet;

use scraper::Html;

use crate::ingest::spreadsheet::{render_cell, Cell};

/// Normalizes a single free-text value. Empty input yields an empty string.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return String::new();
    }

    let without_markup = strip_markup(&lowered);

    // Non-alphanumerics become spaces so "c++/go" splits into "c go"
    let alphanumeric: String = without_markup
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut seen = HashSet::new();
    alphanumeric
        .split_whitespace()
        .filter(|word| seen.insert(*word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes any spreadsheet value. Missing values yield an empty string;
/// non-text values are rendered to text first.
pub fn normalize_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(text) => normalize_text(text),
        other => normalize_text(&render_cell(other)),
    }
}

/// Removes HTML-like tags, keeping their text content. Entities are decoded.
fn strip_markup(text: &str) -> String {
    if !text.contains('<') && !text.contains('&') {
        return text.to_string();
    }
    let fragment = Html::parse_fragment(text);
    fragment.root_element().text().collect()
}
