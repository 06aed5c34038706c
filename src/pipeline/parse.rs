//! Parse stage: raw bytes + detected format → [`Table`].
//!
//! The first row is always the header; everything after it is data. CSV goes
//! through the `csv` crate in flexible mode, Excel through `calamine`
//! reading only the first worksheet (multi-sheet files are an explicit scope
//! limit). All cell values leave this module as the closed [`Cell`] variant;
//! no library type escapes.
//!
//! Ragged CSV policy: rows shorter than the header are padded with nulls,
//! fields beyond the header width are dropped.
//!
//! Date policy: every date/datetime cell is rendered as ISO 8601
//! `%Y-%m-%dT%H:%M:%S`, never as an Excel serial number and never in a
//! locale-dependent format.

use crate::error::SheetError;
use crate::pipeline::detect::FileFormat;
use crate::table::{Cell, Table};
use calamine::{Data, Range, Reader, Xls, Xlsx};
use chrono::NaiveDateTime;
use std::io::Cursor;
use tracing::debug;

/// Textual values treated as missing in CSV input (case-insensitive),
/// mirroring the usual spreadsheet-export conventions.
const CSV_NA_SENTINELS: &[&str] = &["", "na", "n/a", "nan", "null"];

/// Parse `bytes` as `format`, producing a fresh [`Table`].
pub fn parse(bytes: &[u8], format: FileFormat) -> Result<Table, SheetError> {
    let table = match format {
        FileFormat::Csv => parse_csv(bytes)?,
        FileFormat::Xlsx => {
            let workbook = Xlsx::new(Cursor::new(bytes)).map_err(|e| SheetError::ParseFailed {
                detail: format!("invalid xlsx file: {e}"),
            })?;
            parse_first_sheet(workbook)?
        }
        FileFormat::Xls => {
            let workbook = Xls::new(Cursor::new(bytes)).map_err(|e| SheetError::ParseFailed {
                detail: format!("invalid xls file: {e}"),
            })?;
            parse_first_sheet(workbook)?
        }
    };
    debug!(
        "Parsed {} table: {} columns, {} rows",
        format,
        table.columns.len(),
        table.total_rows()
    );
    Ok(table)
}

// ── CSV ──────────────────────────────────────────────────────────────────

fn parse_csv(bytes: &[u8]) -> Result<Table, SheetError> {
    // Decode up front (lossily) so record handling never trips on encoding.
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();

    let columns: Vec<String> = match records.next() {
        None => return Ok(Table::default()),
        Some(header) => {
            let header = header.map_err(|e| SheetError::ParseFailed {
                detail: format!("invalid csv header: {e}"),
            })?;
            header
                .iter()
                .enumerate()
                .map(|(idx, name)| csv_header_name(name, idx))
                .collect()
        }
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| SheetError::ParseFailed {
            detail: format!("invalid csv record: {e}"),
        })?;
        let mut cells: Vec<Cell> = record
            .iter()
            .take(columns.len())
            .map(typed_csv_cell)
            .collect();
        // Short rows: missing trailing fields are null.
        cells.resize(columns.len(), Cell::Null);
        rows.push(cells);
    }

    Ok(Table::new(columns, rows))
}

/// Infer a [`Cell`] from one CSV field.
///
/// Missing-value sentinels → null, then integer, float, boolean, and
/// finally plain text. Integers survive the trip without growing a
/// fractional part; non-finite floats collapse to null immediately.
fn typed_csv_cell(field: &str) -> Cell {
    if CSV_NA_SENTINELS
        .iter()
        .any(|s| field.eq_ignore_ascii_case(s))
    {
        return Cell::Null;
    }
    if let Ok(i) = field.parse::<i64>() {
        return Cell::Number(i as f64);
    }
    if let Ok(f) = field.parse::<f64>() {
        return if f.is_finite() {
            Cell::Number(f)
        } else {
            Cell::Null
        };
    }
    if field.eq_ignore_ascii_case("true") {
        return Cell::Bool(true);
    }
    if field.eq_ignore_ascii_case("false") {
        return Cell::Bool(false);
    }
    Cell::Text(field.to_string())
}

fn csv_header_name(raw: &str, idx: usize) -> String {
    if raw.trim().is_empty() {
        format!("Unnamed: {idx}")
    } else {
        raw.to_string()
    }
}

// ── Excel ────────────────────────────────────────────────────────────────

/// Extract the first worksheet of an already-opened workbook.
fn parse_first_sheet<RS, R>(mut workbook: R) -> Result<Table, SheetError>
where
    RS: std::io::Read + std::io::Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    // A workbook with no sheets parses as an empty table, like a
    // zero-row file.
    let Some(first_sheet) = workbook.sheet_names().first().cloned() else {
        return Ok(Table::default());
    };
    let range: Range<Data> =
        workbook
            .worksheet_range(&first_sheet)
            .map_err(|e| SheetError::ParseFailed {
                detail: format!("could not read worksheet '{first_sheet}': {e}"),
            })?;

    let mut row_iter = range.rows();

    let columns: Vec<String> = match row_iter.next() {
        None => return Ok(Table::default()),
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(idx, cell)| excel_header_name(cell, idx))
            .collect(),
    };

    let rows: Vec<Vec<Cell>> = row_iter
        .map(|row| {
            let mut cells: Vec<Cell> = row.iter().take(columns.len()).map(excel_cell).collect();
            cells.resize(columns.len(), Cell::Null);
            cells
        })
        .collect();

    Ok(Table::new(columns, rows))
}

/// Map one calamine cell to a [`Cell`]. Exhaustive over `Data`.
fn excel_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Null,
        Data::String(s) if s.is_empty() => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        // Serial date numbers are resolved to a calendar value here so no
        // Excel epoch arithmetic ever reaches the response.
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Cell::Date(format_datetime(naive)),
            None => Cell::Null,
        },
        Data::DateTimeIso(s) => Cell::Date(s.clone()),
        Data::DurationIso(s) => Cell::Date(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

fn excel_header_name(cell: &Data, idx: usize) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {idx}"),
        Data::String(s) if s.trim().is_empty() => format!("Unnamed: {idx}"),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_datetime(naive: NaiveDateTime) -> String {
    naive.format("%Y-%m-%dT%H:%M:%S").to_string()
}
