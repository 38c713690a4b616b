//! Data quality profiling.
//!
//! [`profile`] computes the four decay components of a dataset (missing
//! cells, duplicate rows, outdated dates, inconsistent text) and folds them
//! into a single decay score with cleanup recommendations.
//!
//! ```
//! use chrono::{TimeZone as _, Utc};
//! use data_decay::profiler::{ProfileOptions, profile};
//! use polars::prelude::*;
//!
//! let df = DataFrame::new(vec![Column::new("city".into(), vec!["NY", "ny", "LA"])])?;
//! let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
//! let report = profile(&df, now, &ProfileOptions::default())?;
//! assert_eq!(report.inconsistency_percent, 100.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod metrics;
pub mod scoring;
pub mod temporal;
pub mod types;

pub use scoring::Components;
pub use types::{
    CardinalityLimit, ColumnKind, ColumnProfile, DateDetection, MetricReport, ProfileOptions,
    Recommendation,
};

use crate::dataset;
use crate::error::{ResultExt as _, Result};
use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;

/// Profiles `df` against the reference time `now`.
///
/// A dataset without cells yields zero components and no recommendations.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed frames or an out-of-range staleness
/// threshold, and `DataProcessing` if polars fails on a column.
pub fn profile(df: &DataFrame, now: DateTime<Utc>, options: &ProfileOptions) -> Result<MetricReport> {
    dataset::validate(df)?;

    let row_count = df.height();
    let column_count = df.width();
    let total_cells = row_count.saturating_mul(column_count);
    let cutoff = temporal::staleness_cutoff(now, options.staleness_years)?;

    let mut outdated_flags = vec![false; row_count];
    let mut null_cells = 0;
    let mut inconsistent_cells = 0;
    let mut columns = Vec::with_capacity(column_count);

    for col in df.get_columns() {
        let name = col.name().to_string();
        let null_count = col.null_count();
        null_cells += null_count;

        let stamps = temporal::date_stamps(col, options.date_detection)
            .with_context(|| format!("Date detection failed for column '{name}'"))?;
        if let Some(stamps) = &stamps {
            metrics::mark_outdated(&mut outdated_flags, stamps, &cutoff);
        }

        let consistency = metrics::text_consistency(col)
            .with_context(|| format!("Text analysis failed for column '{name}'"))?;
        let inconsistent = consistency
            .is_some_and(|c| c.is_inconsistent(row_count, options.cardinality_limit));
        if inconsistent {
            inconsistent_cells += row_count;
        }

        tracing::debug!(
            column = %name,
            nulls = null_count,
            date_column = stamps.is_some(),
            inconsistent,
            "Profiled column"
        );

        columns.push(ColumnProfile {
            name,
            kind: ColumnKind::of(col.dtype()),
            null_count,
            distinct_count: consistency.map_or(0, |c| c.distinct),
            date_column: stamps.is_some(),
            inconsistent,
        });
    }

    let components = if total_cells == 0 {
        Components::default()
    } else {
        let duplicate_rows = metrics::duplicate_row_count(df)?;
        let outdated_rows = outdated_flags.iter().filter(|flag| **flag).count();
        Components {
            null_percent: metrics::percent(null_cells, total_cells),
            duplicate_percent: metrics::percent(duplicate_rows, row_count),
            outdated_percent: metrics::percent(outdated_rows, row_count),
            inconsistency_percent: metrics::percent(inconsistent_cells, total_cells),
        }
    };

    let decay_score = components.decay_score();
    let recommendations = if total_cells == 0 {
        Vec::new()
    } else {
        scoring::recommend(&components, decay_score)
    };

    tracing::info!(
        rows = row_count,
        columns = column_count,
        decay_score,
        "Profiled dataset"
    );

    Ok(MetricReport {
        row_count,
        column_count,
        null_percent: components.null_percent,
        duplicate_percent: components.duplicate_percent,
        outdated_percent: components.outdated_percent,
        inconsistency_percent: components.inconsistency_percent,
        decay_score,
        recommendations,
        columns,
    })
}

#[cfg(test)]
mod tests;
