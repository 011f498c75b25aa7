//! Record Cleaner: turns a raw candidate sheet into flat string records.
//!
//! Order of operations matters:
//! 1. float columns → boolean tokens or float text
//! 2. missing / "nan" / "nat" → ""
//! 3. normalize allow-listed text columns
//! 4. drop exact duplicate rows
//! 5. stringify → `CandidateRecord`
//! 6. write indented JSON

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::RankerError;
use crate::ingest::normalizer::normalize_cell;
use crate::ingest::spreadsheet::{load_table, render_cell, render_float, Cell, ColumnKind, Table};
use crate::models::candidate::CandidateRecord;

pub const DEFAULT_INPUT_FILE: &str = "zipdev-candidate-database-raw.xlsx";
pub const DEFAULT_OUTPUT_FILE: &str = "processed_candidates.json";

pub const TRUTHY_TOKEN: &str = "VERDADERO";
pub const FALSY_TOKEN: &str = "FALSO";

/// Columns the prompt builder depends on.
pub const REQUIRED_COLUMNS: &[&str] = &["Name", "Skills"];

/// Free-text columns that go through the normalizer when present.
pub const TEXT_COLUMNS: &[&str] = &[
    "Name",
    "Job title",
    "Job department",
    "Job location",
    "Headline",
    "Summary",
    "Keywords",
    "Educations",
    "Experiences",
    "Skills",
    "Disqualification reason",
    "Disqualification note",
    "Answer 1",
    "Question 1",
    "Answer 2",
    "Question 2",
    "Answer 3",
    "Question 3",
    "Answer 4",
    "Question 4",
    "Answer 5",
    "Question 5",
    "Answer 6",
    "Question 6",
    "Answer 7",
    "Question 7",
];

#[derive(Debug, Clone)]
pub struct CleanerOptions {
    pub truthy_token: String,
    pub falsy_token: String,
    pub text_columns: Vec<String>,
}

impl Default for CleanerOptions {
    fn default() -> Self {
        Self {
            truthy_token: TRUTHY_TOKEN.to_string(),
            falsy_token: FALSY_TOKEN.to_string(),
            text_columns: TEXT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Loads `input`, cleans it, and writes the records to `output`.
pub fn preprocess(
    input: &Path,
    sheet: Option<&str>,
    output: &Path,
    options: &CleanerOptions,
) -> Result<Vec<CandidateRecord>, RankerError> {
    let table = load_table(input, sheet)?;
    table.require_columns(REQUIRED_COLUMNS)?;

    let records = clean_table(table, options);
    write_records(&records, output)?;

    info!(
        "Saved {} cleaned candidates to {}",
        records.len(),
        output.display()
    );
    Ok(records)
}

/// Runs steps 1–5 over an in-memory table.
pub fn clean_table(table: Table, options: &CleanerOptions) -> Vec<CandidateRecord> {
    let input_rows = table.len();
    let float_columns: Vec<usize> = (0..table.headers().len())
        .filter(|&i| table.column_kind(i) == ColumnKind::Float)
        .collect();
    let text_columns: Vec<usize> = options
        .text_columns
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();

    let (headers, mut rows) = table.into_parts();

    // Step 1
    for &col in &float_columns {
        convert_float_column(&mut rows, col, options);
    }

    // Step 2
    for row in rows.iter_mut() {
        for cell in row.iter_mut() {
            if is_missing(cell) {
                *cell = Cell::Text(String::new());
            }
        }
    }

    // Step 3
    for row in rows.iter_mut() {
        for &col in &text_columns {
            row[col] = Cell::Text(normalize_cell(&row[col]));
        }
    }

    // Step 4
    let rows = drop_duplicate_rows(rows);
    debug!(
        "Dropped {} duplicate rows ({} → {})",
        input_rows - rows.len(),
        input_rows,
        rows.len()
    );

    // Step 5
    rows.iter()
        .map(|row| {
            CandidateRecord::from_pairs(
                headers
                    .iter()
                    .zip(row.iter())
                    .map(|(header, cell)| (header.clone(), render_cell(cell))),
            )
        })
        .collect()
}

/// Writes records as 4-space-indented JSON. Non-ASCII text is written as-is.
pub fn write_records(records: &[CandidateRecord], path: &Path) -> Result<(), RankerError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

fn convert_float_column(rows: &mut [Vec<Cell>], col: usize, options: &CleanerOptions) {
    let is_boolean = rows
        .iter()
        .filter_map(|row| row[col].as_number())
        .all(|v| v == 0.0 || v == 1.0);

    for row in rows.iter_mut() {
        let cell = &mut row[col];
        let rendered = match (cell.as_number(), is_boolean) {
            (Some(v), true) if v == 1.0 => options.truthy_token.clone(),
            (Some(_), true) => options.falsy_token.clone(),
            (None, true) => String::new(),
            (Some(v), false) => render_float(v),
            (None, false) => render_float(f64::NAN),
        };
        *cell = Cell::Text(rendered);
    }
}

fn is_missing(cell: &Cell) -> bool {
    match cell {
        Cell::Empty => true,
        Cell::Text(s) => s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("nat"),
        _ => false,
    }
}

/// Keeps the first occurrence of every row. Cells compare by type and value.
fn drop_duplicate_rows(rows: Vec<Vec<Cell>>) -> Vec<Vec<Cell>> {
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.iter().map(cell_key).collect()))
        .collect()
}

fn cell_key(cell: &Cell) -> String {
    let tag = match cell {
        Cell::Empty => "e",
        Cell::Text(_) => "s",
        Cell::Float(_) => "f",
        Cell::Int(_) => "i",
        Cell::Bool(_) => "b",
        Cell::DateTime(_) => "d",
    };
    format!("{tag}:{}", render_cell(cell))
}
