//! Spreadsheet loading: one worksheet into a typed, header-keyed `Table`.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::errors::RankerError;

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Float(f64),
    Int(i64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Float(f) => Some(*f),
            Cell::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

/// How a column's values are typed as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every non-empty cell is numeric, and the column has a float cell or a
    /// gap. Whole numbers read from a workbook arrive as `Int`, so a fully
    /// filled column of whole numbers is not `Float`.
    Float,
    /// Every cell is an integer, with no gaps.
    Int,
    Mixed,
}

/// Rows × named columns. Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table, padding short rows with `Empty` and truncating long ones.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        for row in rows.iter_mut() {
            row.resize(width, Cell::Empty);
        }
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn column_kind(&self, index: usize) -> ColumnKind {
        let mut saw_float = false;
        let mut saw_int = false;
        let mut saw_gap = false;
        for row in &self.rows {
            match &row[index] {
                Cell::Empty => saw_gap = true,
                Cell::Float(_) => saw_float = true,
                Cell::Int(_) => saw_int = true,
                _ => return ColumnKind::Mixed,
            }
        }
        match (saw_float, saw_int, saw_gap) {
            (false, false, _) => ColumnKind::Mixed,
            (true, _, _) | (false, true, true) => ColumnKind::Float,
            (false, true, false) => ColumnKind::Int,
        }
    }

    /// Fails with an input error naming every absent column.
    pub fn require_columns(&self, required: &[&str]) -> Result<(), RankerError> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| self.column_index(name).is_none())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RankerError::Input(format!(
                "Spreadsheet is missing expected column(s): {}",
                missing.join(", ")
            )))
        }
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Cell>>) {
        (self.headers, self.rows)
    }
}

/// Reads a worksheet into memory. The first row is the header row.
///
/// `sheet` selects a worksheet by name; `None` takes the first one.
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table, RankerError> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) if sheet_names.iter().any(|s| s == name) => name.to_string(),
        Some(name) => {
            return Err(RankerError::Input(format!(
                "Worksheet '{name}' not found in {} (available: {})",
                path.display(),
                sheet_names.join(", ")
            )))
        }
        None => sheet_names.first().cloned().ok_or_else(|| {
            RankerError::Input(format!("{} does not contain any worksheets", path.display()))
        })?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows_iter = range.rows();
    let header_row = rows_iter
        .next()
        .ok_or_else(|| RankerError::Input(format!("Worksheet '{sheet_name}' is empty")))?;

    let headers = unique_headers(
        header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect(),
    );

    let rows: Vec<Vec<Cell>> = rows_iter
        .map(|row| row.iter().map(to_cell).collect::<Vec<_>>())
        .filter(|row: &Vec<Cell>| !row.iter().all(Cell::is_empty))
        .collect();

    debug!("Worksheet '{}' headers: {:?}", sheet_name, headers);
    info!(
        "Loaded {} rows × {} columns from '{}' ({})",
        rows.len(),
        headers.len(),
        sheet_name,
        path.display()
    );

    Ok(Table::new(headers, rows))
}

/// Names blank headers `Unnamed: <index>` and suffixes repeats with `.1`,
/// `.2`, ... so no two columns share a key.
pub fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (index, name) in raw.into_iter().enumerate() {
        let mut name = if name.is_empty() {
            format!("Unnamed: {index}")
        } else {
            name
        };
        let mut count = counts.get(&name).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(name.clone(), count + 1);
            name = format!("{name}.{count}");
            count = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), count + 1);
        headers.push(name);
    }
    headers
}

/// Largest magnitude at which every whole `f64` is exact.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        // xlsx stores every number as a float; whole ones are integers.
        Data::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INT => Cell::Int(*f as i64),
        Data::Float(f) => Cell::Float(*f),
        Data::Int(i) => Cell::Int(*i),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => data
            .as_datetime()
            .map(Cell::DateTime)
            .unwrap_or_else(|| Cell::Text(data.to_string())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Renders a float the way Python's `str(float)` does: integral values keep
/// a trailing `.0`, missing values read `nan`, and values below `1e-4` or at
/// least `1e16` use exponent form (`1e-05`, `1.5e+16`).
pub fn render_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.5e16".
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if exponent < -4 || exponent >= 16 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.abs());
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Canonical text form of a cell.
pub fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.clone(),
        Cell::Float(f) => render_float(*f),
        Cell::Int(i) => i.to_string(),
        Cell::Bool(true) => "True".to_string(),
        Cell::Bool(false) => "False".to_string(),
        Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    fn table(headers: &[&str], rows: Vec<Vec<Cell>>) -> Table {
        Table::new(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    /// Sheet "Candidates": header row, two data rows around a blank row, a
    /// whole-number column, a fractional column, and a date column.
    fn write_sample_workbook(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Candidates").unwrap();
        for (col, header) in ["Name", "Skills", "Years", "Rating", "Applied"].iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        let applied = ExcelDateTime::from_ymd(2024, 3, 9)
            .unwrap()
            .and_hms(14, 5, 0)
            .unwrap();

        sheet.write_string(1, 0, "Ana").unwrap();
        sheet.write_string(1, 1, "Go").unwrap();
        sheet.write_number(1, 2, 5).unwrap();
        sheet.write_number(1, 3, 4.5).unwrap();
        sheet
            .write_datetime_with_format(1, 4, &applied, &date_format)
            .unwrap();

        sheet.write_string(3, 0, "Luis").unwrap();
        sheet.write_string(3, 1, "Rails").unwrap();
        sheet.write_number(3, 2, 3).unwrap();
        sheet.write_number(3, 3, 2.0).unwrap();

        workbook.add_worksheet().set_name("Empty").unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_short_rows_are_padded() {
        let t = table(&["A", "B", "C"], vec![vec![Cell::Int(1)]]);
        assert_eq!(t.rows()[0], vec![Cell::Int(1), Cell::Empty, Cell::Empty]);
    }

    #[test]
    fn test_column_kind_inference() {
        let t = table(
            &["score", "age", "name", "blank", "years"],
            vec![
                vec![Cell::Float(1.0), Cell::Int(30), Cell::Text("ana".into()), Cell::Empty, Cell::Int(5)],
                vec![Cell::Empty, Cell::Int(41), Cell::Float(2.0), Cell::Empty, Cell::Int(3)],
                vec![Cell::Int(0), Cell::Empty, Cell::Empty, Cell::Empty, Cell::Int(8)],
            ],
        );
        assert_eq!(t.column_kind(0), ColumnKind::Float);
        // whole numbers with a gap become floats
        assert_eq!(t.column_kind(1), ColumnKind::Float);
        assert_eq!(t.column_kind(2), ColumnKind::Mixed);
        assert_eq!(t.column_kind(3), ColumnKind::Mixed);
        assert_eq!(t.column_kind(4), ColumnKind::Int);
    }

    #[test]
    fn test_whole_floats_from_the_workbook_become_integers() {
        assert_eq!(to_cell(&Data::Float(5.0)), Cell::Int(5));
        assert_eq!(to_cell(&Data::Float(-12.0)), Cell::Int(-12));
        assert_eq!(to_cell(&Data::Float(4.5)), Cell::Float(4.5));
        assert_eq!(to_cell(&Data::Float(1e300)), Cell::Float(1e300));
    }

    #[test]
    fn test_unique_headers_renames_blanks_and_repeats() {
        assert_eq!(
            unique_headers(strings(&["Name", "", "", "Name"])),
            strings(&["Name", "Unnamed: 1", "Unnamed: 2", "Name.1"])
        );
        assert_eq!(
            unique_headers(strings(&["A", "A.1", "A", "A"])),
            strings(&["A", "A.1", "A.2", "A.3"])
        );
    }

    #[test]
    fn test_require_columns_lists_missing() {
        let t = table(&["Name"], vec![]);
        let err = t.require_columns(&["Name", "Skills", "Summary"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Skills") && msg.contains("Summary"));
        assert!(!msg.contains("Name,"));
    }

    #[test]
    fn test_render_float_matches_python_str() {
        assert_eq!(render_float(1.0), "1.0");
        assert_eq!(render_float(0.0), "0.0");
        assert_eq!(render_float(3.25), "3.25");
        assert_eq!(render_float(-12.0), "-12.0");
        assert_eq!(render_float(f64::NAN), "nan");
        assert_eq!(render_float(0.0001), "0.0001");
        assert_eq!(render_float(1e-5), "1e-05");
        assert_eq!(render_float(1.25e-7), "1.25e-07");
        assert_eq!(render_float(1e15), "1000000000000000.0");
        assert_eq!(render_float(1e16), "1e+16");
        assert_eq!(render_float(-1.5e20), "-1.5e+20");
    }

    #[test]
    fn test_render_cell_variants() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(render_cell(&Cell::DateTime(dt)), "2024-03-09 14:05:00");
        assert_eq!(render_cell(&Cell::Bool(true)), "True");
        assert_eq!(render_cell(&Cell::Int(7)), "7");
        assert_eq!(render_cell(&Cell::Empty), "");
    }

    #[test]
    fn test_missing_workbook_is_an_error() {
        let err = load_table(Path::new("definitely/not/here.xlsx"), None).unwrap_err();
        assert!(matches!(err, RankerError::Spreadsheet(_)));
    }

    #[test]
    fn test_load_table_reads_first_sheet_and_skips_blank_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.xlsx");
        write_sample_workbook(&path);

        let t = load_table(&path, None).unwrap();
        assert_eq!(t.headers(), strings(&["Name", "Skills", "Years", "Rating", "Applied"]).as_slice());
        assert_eq!(t.len(), 2);

        let applied = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(
            t.rows()[0],
            vec![
                Cell::Text("Ana".into()),
                Cell::Text("Go".into()),
                Cell::Int(5),
                Cell::Float(4.5),
                Cell::DateTime(applied),
            ]
        );
        assert_eq!(t.rows()[1][0], Cell::Text("Luis".into()));
        assert_eq!(t.rows()[1][4], Cell::Empty);

        assert_eq!(t.column_kind(2), ColumnKind::Int);
        assert_eq!(t.column_kind(3), ColumnKind::Float);
    }

    #[test]
    fn test_load_table_selects_named_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.xlsx");
        write_sample_workbook(&path);

        let t = load_table(&path, Some("Candidates")).unwrap();
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_unknown_sheet_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.xlsx");
        write_sample_workbook(&path);

        let err = load_table(&path, Some("Hires")).unwrap_err();
        match err {
            RankerError::Input(msg) => {
                assert!(msg.contains("Hires"));
                assert!(msg.contains("Candidates"));
            }
            other => panic!("expected an input error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_sheet_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.xlsx");
        write_sample_workbook(&path);

        let err = load_table(&path, Some("Empty")).unwrap_err();
        assert!(matches!(err, RankerError::Input(msg) if msg.contains("empty")));
    }

    #[test]
    fn test_repeated_and_blank_headers_keep_every_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headers.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Name").unwrap();
        sheet.write_string(0, 3, "Name").unwrap();
        for (col, value) in ["Ana", "a", "b", "Second"].iter().enumerate() {
            sheet.write_string(1, col as u16, *value).unwrap();
        }
        workbook.save(&path).unwrap();

        let t = load_table(&path, None).unwrap();
        assert_eq!(
            t.headers(),
            strings(&["Name", "Unnamed: 1", "Unnamed: 2", "Name.1"]).as_slice()
        );
        assert_eq!(t.column_index("Name"), Some(0));
        assert_eq!(t.rows()[0][3], Cell::Text("Second".into()));
    }
}
