//! Date-column recognition and staleness comparison.
//!
//! Declared `Date`/`Datetime` columns always take part in the outdated
//! metric. With [`DateDetection::NameHinted`] a text column also qualifies
//! when its name carries a date hint and every non-null value parses with
//! one of the accepted formats.

use super::types::DateDetection;
use crate::error::{DecayError, Result};
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, Utc};
use polars::prelude::*;

const DATE_NAME_HINTS: &[&str] = &[
    "date", "time", "updated", "created", "modified", "_at", "day",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%d %b %Y"];

/// A single date cell, either day-granular or an instant (naive UTC).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stamp {
    Day(NaiveDate),
    Instant(NaiveDateTime),
}

impl Stamp {
    /// Days compare by calendar day, so a date on the cut-off day is not stale.
    pub fn is_before(&self, cutoff: &NaiveDateTime) -> bool {
        match self {
            Self::Day(day) => *day < cutoff.date(),
            Self::Instant(instant) => instant < cutoff,
        }
    }
}

/// `now` minus `years` calendar years.
///
/// # Errors
///
/// Fails with `InvalidInput` when the subtraction leaves chrono's range.
pub fn staleness_cutoff(now: DateTime<Utc>, years: u32) -> Result<NaiveDateTime> {
    now.naive_utc()
        .checked_sub_months(Months::new(years.saturating_mul(12)))
        .ok_or_else(|| {
            DecayError::InvalidInput(format!(
                "staleness threshold of {years} years is out of range for {now}"
            ))
        })
}

pub fn name_hints_date(name: &str) -> bool {
    let name = name.to_lowercase();
    DATE_NAME_HINTS.iter().any(|hint| name.contains(hint))
}

pub fn parse_text_stamp(raw: &str) -> Option<Stamp> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Stamp::Instant(dt.naive_utc()));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(Stamp::Instant)
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(Stamp::Day)
        })
}

/// Per-row stamps for a column recognised as date-valued, `None` otherwise.
///
/// # Errors
///
/// Returns an error if polars cannot cast a temporal column to its physical
/// representation.
pub fn date_stamps(col: &Column, detection: DateDetection) -> Result<Option<Vec<Option<Stamp>>>> {
    if let Some(stamps) = declared_stamps(col)? {
        return Ok(Some(stamps));
    }
    if detection == DateDetection::NameHinted
        && col.dtype() == &DataType::String
        && name_hints_date(col.name().as_str())
    {
        return Ok(match text_stamps(col)? {
            TextDates::Parsed(stamps) => Some(stamps),
            TextDates::Empty => None,
            TextDates::Unparseable => {
                tracing::warn!(
                    "Column '{}' looks like a date by name but not all values parse",
                    col.name()
                );
                None
            }
        });
    }
    Ok(None)
}

fn declared_stamps(col: &Column) -> Result<Option<Vec<Option<Stamp>>>> {
    let series = col.as_materialized_series();
    match col.dtype() {
        DataType::Date => {
            let physical = series.cast(&DataType::Int32)?;
            let stamps = physical
                .i32()?
                .into_iter()
                .map(|days| days.and_then(day_from_epoch).map(Stamp::Day))
                .collect();
            Ok(Some(stamps))
        }
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let physical = series.cast(&DataType::Int64)?;
            let stamps = physical
                .i64()?
                .into_iter()
                .map(|v| v.and_then(|v| instant_from_epoch(v, unit)).map(Stamp::Instant))
                .collect();
            Ok(Some(stamps))
        }
        _ => Ok(None),
    }
}

/// Outcome of parsing a name-hinted text column.
#[derive(PartialEq, Debug)]
enum TextDates {
    Parsed(Vec<Option<Stamp>>),
    /// Every cell is null.
    Empty,
    /// At least one value is not a date.
    Unparseable,
}

fn text_stamps(col: &Column) -> Result<TextDates> {
    let series = col.as_materialized_series();
    let ca = series.str()?;
    let mut stamps = Vec::with_capacity(ca.len());
    let mut parsed_any = false;

    for value in ca {
        match value {
            None => stamps.push(None),
            Some(raw) => match parse_text_stamp(raw) {
                Some(stamp) => {
                    parsed_any = true;
                    stamps.push(Some(stamp));
                }
                None => return Ok(TextDates::Unparseable),
            },
        }
    }

    Ok(if parsed_any {
        TextDates::Parsed(stamps)
    } else {
        TextDates::Empty
    })
}

fn day_from_epoch(days: i32) -> Option<NaiveDate> {
    DateTime::from_timestamp(i64::from(days) * 86_400, 0).map(|t| t.date_naive())
}

fn instant_from_epoch(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let instant = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value)?,
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value)?,
        TimeUnit::Nanoseconds => DateTime::from_timestamp_nanos(value),
    };
    Some(instant.naive_utc())
}
