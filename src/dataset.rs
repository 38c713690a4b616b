//! Building and validating datasets.
//!
//! A dataset is a polars [`DataFrame`]. Collaborators that parse files row by
//! row (spreadsheets, form uploads) can hand the cells to [`from_rows`],
//! which enforces the rectangular shape the profiler relies on.

use crate::error::{DecayError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use polars::prelude::*;
use std::collections::HashSet;
use std::fmt;

/// One cell of a row-oriented table.
#[derive(Clone, PartialEq, Debug)]
pub enum Cell {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Text,
    Number,
    Bool,
    Date,
    DateTime,
}

impl CellKind {
    /// Common column kind for two cells, `None` when they only agree as text.
    fn merge(self, other: Self) -> Option<Self> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (Self::Date | Self::DateTime, Self::Date | Self::DateTime) => Some(Self::DateTime),
            _ => None,
        }
    }
}

impl Cell {
    fn kind(&self) -> Option<CellKind> {
        match self {
            Self::Null => None,
            Self::Text(_) => Some(CellKind::Text),
            Self::Number(_) => Some(CellKind::Number),
            Self::Bool(_) => Some(CellKind::Bool),
            Self::Date(_) => Some(CellKind::Date),
            Self::DateTime(_) => Some(CellKind::DateTime),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Builds a frame from a header and rows of cells.
///
/// A column whose non-null cells all share one kind gets the matching
/// dtype. Dates mixed with datetimes become `Datetime` (dates at midnight);
/// other mixed columns are stored as text using each cell's display form;
/// all-null columns get the `Null` dtype.
///
/// # Errors
///
/// Returns `InvalidInput` when a header name repeats or a row does not have
/// exactly one cell per header.
pub fn from_rows<S: AsRef<str>>(headers: &[S], rows: &[Vec<Cell>]) -> Result<DataFrame> {
    let width = headers.len();
    check_unique_names(headers.iter().map(AsRef::as_ref))?;
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(DecayError::InvalidInput(format!(
                "row {} has {} cells, expected {width}",
                idx + 1,
                row.len()
            )));
        }
    }

    let mut cells_by_column: Vec<Vec<&Cell>> = vec![Vec::with_capacity(rows.len()); width];
    for row in rows {
        for (column, cell) in cells_by_column.iter_mut().zip(row) {
            column.push(cell);
        }
    }

    let columns = headers
        .iter()
        .zip(&cells_by_column)
        .map(|(name, cells)| build_column(name.as_ref(), cells))
        .collect::<Result<Vec<_>>>()?;

    let df = DataFrame::new(columns)?;
    tracing::debug!("Built dataset with {} rows and {} columns", df.height(), df.width());
    Ok(df)
}

/// Rejects frames whose columns disagree on length or repeat a name.
///
/// # Errors
///
/// Returns `InvalidInput` describing the first problem found.
pub fn validate(df: &DataFrame) -> Result<()> {
    let height = df.height();
    for col in df.get_columns() {
        if col.len() != height {
            return Err(DecayError::InvalidInput(format!(
                "column '{}' has {} values, expected {height}",
                col.name(),
                col.len()
            )));
        }
    }
    check_unique_names(df.get_columns().iter().map(|c| c.name().as_str()))
}

fn check_unique_names<'a>(names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(DecayError::InvalidInput(format!(
                "duplicate column name '{name}'"
            )));
        }
    }
    Ok(())
}

fn build_column(name: &str, cells: &[&Cell]) -> Result<Column> {
    let mut kinds = cells.iter().filter_map(|c| c.kind());
    let Some(first) = kinds.next() else {
        return Ok(Column::from(Series::full_null(name.into(), cells.len(), &DataType::Null)));
    };
    let Some(kind) = kinds.try_fold(first, CellKind::merge) else {
        let values: Vec<Option<String>> = cells
            .iter()
            .map(|c| (**c != Cell::Null).then(|| c.to_string()))
            .collect();
        return Ok(Column::new(name.into(), values));
    };

    let column = match kind {
        CellKind::Text => {
            let values: Vec<Option<&str>> = cells
                .iter()
                .map(|c| match c {
                    Cell::Text(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Number => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|c| match c {
                    Cell::Number(n) => Some(*n),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|c| match c {
                    Cell::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Date => {
            let epoch = DateTime::<Utc>::UNIX_EPOCH.date_naive();
            let values = cells
                .iter()
                .map(|c| match c {
                    Cell::Date(d) => i32::try_from(d.signed_duration_since(epoch).num_days())
                        .map(Some)
                        .map_err(|_| {
                            DecayError::InvalidInput(format!("date {d} in '{name}' is out of range"))
                        }),
                    _ => Ok(None),
                })
                .collect::<Result<Vec<Option<i32>>>>()?;
            Column::from(Series::new(name.into(), values).cast(&DataType::Date)?)
        }
        CellKind::DateTime => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|c| match c {
                    Cell::DateTime(dt) => Some(dt.and_utc().timestamp_millis()),
                    Cell::Date(d) => Some(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis()),
                    _ => None,
                })
                .collect();
            Column::from(
                Series::new(name.into(), values)
                    .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?,
            )
        }
    };
    Ok(column)
}
