//! The fixed cleaning transform: drop exact duplicate rows (keeping the
//! first occurrence), then drop every row that still holds a null cell.
//!
//! Each step is a [`Transform`] over a polars `LazyFrame`, applied in order
//! by a [`CleaningPipeline`].

use crate::dataset;
use crate::error::{ResultExt as _, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// A deterministic step of the cleaning pipeline.
pub trait Transform: Send + Sync {
    /// Apply this transform to a `LazyFrame`
    ///
    /// # Errors
    ///
    /// Returns an error if the transform cannot be expressed for this frame.
    fn apply(&self, lf: LazyFrame) -> Result<LazyFrame>;

    /// Get the name of this transform
    fn name(&self) -> &'static str;

    /// Create a summary of what this transform does
    fn description(&self) -> String;
}

/// Drops rows equal to an earlier row across every column.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeduplicateRowsTransform;

impl Transform for DeduplicateRowsTransform {
    fn apply(&self, lf: LazyFrame) -> Result<LazyFrame> {
        Ok(lf.unique_stable(None, UniqueKeepStrategy::First))
    }

    fn name(&self) -> &'static str {
        "deduplicate_rows"
    }

    fn description(&self) -> String {
        "Drop exact duplicate rows, keeping the first occurrence".to_owned()
    }
}

/// Drops rows with a null in any column.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropNullRowsTransform;

impl Transform for DropNullRowsTransform {
    fn apply(&self, lf: LazyFrame) -> Result<LazyFrame> {
        Ok(lf.drop_nulls(None))
    }

    fn name(&self) -> &'static str {
        "drop_nulls"
    }

    fn description(&self) -> String {
        "Drop rows with any null".to_owned()
    }
}

#[derive(Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct CleaningSummary {
    pub input_rows: usize,
    pub duplicate_rows_removed: usize,
    pub null_rows_removed: usize,
    pub output_rows: usize,
}

/// Transforms applied sequentially.
pub struct CleaningPipeline {
    transforms: Vec<Box<dyn Transform>>,
}

impl CleaningPipeline {
    /// Deduplicate, then drop null rows.
    pub fn standard() -> Self {
        Self {
            transforms: vec![
                Box::new(DeduplicateRowsTransform),
                Box::new(DropNullRowsTransform),
            ],
        }
    }

    /// Runs every step, returning the final frame and the row count after
    /// each step.
    ///
    /// # Errors
    ///
    /// Returns an error naming the step that failed.
    pub fn run(&self, df: &DataFrame) -> Result<(DataFrame, Vec<usize>)> {
        let mut current = df.clone();
        let mut heights = Vec::with_capacity(self.transforms.len());

        for (idx, transform) in self.transforms.iter().enumerate() {
            current = transform
                .apply(current.lazy())
                .and_then(|lf| Ok(lf.collect()?))
                .with_context(|| {
                    format!("Failed to apply transform {}: {}", idx, transform.name())
                })?;
            tracing::debug!(
                step = transform.name(),
                rows = current.height(),
                "Applied cleaning step: {}",
                transform.description()
            );
            heights.push(current.height());
        }

        Ok((current, heights))
    }
}

/// Returns the cleaned copy of `df`.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed frames and `DataProcessing` if
/// polars fails.
pub fn clean(df: &DataFrame) -> Result<DataFrame> {
    clean_with_summary(df).map(|(cleaned, _)| cleaned)
}

/// Like [`clean`], also reporting how many rows each step removed.
///
/// # Errors
///
/// See [`clean`].
pub fn clean_with_summary(df: &DataFrame) -> Result<(DataFrame, CleaningSummary)> {
    dataset::validate(df)?;
    let input_rows = df.height();

    if df.width() == 0 || input_rows == 0 {
        return Ok((
            df.clone(),
            CleaningSummary {
                input_rows,
                output_rows: input_rows,
                ..CleaningSummary::default()
            },
        ));
    }

    let (cleaned, heights) = CleaningPipeline::standard().run(df)?;
    let after_dedup = heights.first().copied().unwrap_or(input_rows);
    let output_rows = cleaned.height();

    let summary = CleaningSummary {
        input_rows,
        duplicate_rows_removed: input_rows.saturating_sub(after_dedup),
        null_rows_removed: after_dedup.saturating_sub(output_rows),
        output_rows,
    };
    tracing::info!(
        input_rows,
        duplicates = summary.duplicate_rows_removed,
        null_rows = summary.null_rows_removed,
        output_rows,
        "Cleaned dataset"
    );

    Ok((cleaned, summary))
}
