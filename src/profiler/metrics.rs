//! Component metrics over a polars `DataFrame`.
//!
//! Each helper covers one piece of the four decay components; `profile`
//! stitches them together in a single pass over the columns.

use super::temporal::Stamp;
use super::types::CardinalityLimit;
use crate::error::Result;
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::collections::HashSet;

/// `count / denominator` as a percentage in `[0, 100]`; zero when the
/// denominator is zero.
pub fn percent(count: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        (count as f64 / denominator as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Rows equal to an earlier row across every column. The first occurrence
/// of each value tuple is never counted.
///
/// # Errors
///
/// Returns an error if polars fails to compute the unique rows.
pub fn duplicate_row_count(df: &DataFrame) -> Result<usize> {
    if df.height() < 2 || df.width() == 0 {
        return Ok(0);
    }
    let unique = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(df.height().saturating_sub(unique.height()))
}

/// Sets `flags[i]` for every row whose stamp is older than the cut-off.
pub fn mark_outdated(flags: &mut [bool], stamps: &[Option<Stamp>], cutoff: &NaiveDateTime) {
    for (flag, stamp) in flags.iter_mut().zip(stamps) {
        if let Some(stamp) = stamp
            && stamp.is_before(cutoff)
        {
            *flag = true;
        }
    }
}

pub fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Distinct value counts of a text column, raw and after normalisation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TextConsistency {
    pub distinct: usize,
    pub normalized_distinct: usize,
}

impl TextConsistency {
    /// True when two raw values collapse to the same normalised value, or
    /// when the optional cardinality limit is exceeded.
    pub fn is_inconsistent(&self, row_count: usize, limit: Option<CardinalityLimit>) -> bool {
        self.distinct != self.normalized_distinct
            || limit.is_some_and(|l| l.is_exceeded(self.distinct, row_count))
    }
}

/// `None` for columns that are not text.
///
/// # Errors
///
/// Returns an error if polars cannot view the column as strings.
pub fn text_consistency(col: &Column) -> Result<Option<TextConsistency>> {
    if col.dtype() != &DataType::String {
        return Ok(None);
    }
    let series = col.as_materialized_series();
    let ca = series.str()?;

    let mut raw = HashSet::new();
    let mut normalized = HashSet::new();
    for value in ca.into_iter().flatten() {
        if raw.insert(value) {
            normalized.insert(normalize_text(value));
        }
    }

    Ok(Some(TextConsistency {
        distinct: raw.len(),
        normalized_distinct: normalized.len(),
    }))
}
