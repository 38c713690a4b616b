//! Spreadsheet uploads (`.xlsx`, `.xlsm`, `.xls`, `.ods`).
//!
//! The first worksheet is read. Its first row is the header row and every
//! following row becomes a row of [`Cell`]s handed to [`dataset::from_rows`].

use crate::dataset::{self, Cell};
use crate::error::{DecayError, Result};
use crate::profiler::temporal::{Stamp, parse_text_stamp};
use calamine::{Data, Reader as _, open_workbook_auto};
use chrono::{NaiveDateTime, NaiveTime};
use polars::prelude::DataFrame;
use std::path::Path;

pub const EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// # Errors
///
/// Returns `DataProcessing` if the workbook cannot be opened or parsed, and
/// `InvalidInput` if it has no worksheet or repeats a header name.
pub fn read_first_sheet(path: &Path) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        DecayError::DataProcessing(format!("Failed to open workbook {}: {e}", path.display()))
    })?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Err(DecayError::InvalidInput(format!(
            "workbook {} has no worksheets",
            path.display()
        )));
    };
    let range = workbook.worksheet_range(&sheet).map_err(|e| {
        DecayError::DataProcessing(format!("Failed to read worksheet '{sheet}': {e}"))
    })?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().enumerate().map(|(idx, d)| header_name(idx, d)).collect())
        .unwrap_or_default();
    let cells: Vec<Vec<Cell>> = rows.map(|row| row.iter().map(to_cell).collect()).collect();

    tracing::debug!(
        "Read worksheet '{sheet}' ({} data rows x {} columns)",
        cells.len(),
        headers.len()
    );
    dataset::from_rows(&headers, &cells)
}

fn header_name(idx: usize, data: &Data) -> String {
    let name = to_cell(data).to_string();
    let name = name.trim();
    if name.is_empty() {
        format!("column_{}", idx + 1)
    } else {
        name.to_owned()
    }
}

fn stamp_cell(dt: NaiveDateTime) -> Cell {
    if dt.time() == NaiveTime::MIN {
        Cell::Date(dt.date())
    } else {
        Cell::DateTime(dt)
    }
}

/// Error cells (`#N/A`, `#DIV/0!`) read as missing values.
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => Cell::Number(dt.as_f64()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or_else(|| Cell::Number(dt.as_f64()), stamp_cell),
        Data::DateTimeIso(s) => match parse_text_stamp(s) {
            Some(Stamp::Day(day)) => Cell::Date(day),
            Some(Stamp::Instant(instant)) => Cell::DateTime(instant),
            None => Cell::Text(s.clone()),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
