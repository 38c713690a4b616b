use super::scoring::Components;
use polars::prelude::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a column, derived from its polars dtype.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Numeric,
    Temporal,
    Unknown,
}

impl ColumnKind {
    pub fn of(dtype: &DataType) -> Self {
        match dtype {
            DataType::String => Self::Text,
            DataType::Date | DataType::Datetime(_, _) => Self::Temporal,
            d if d.is_numeric() => Self::Numeric,
            _ => Self::Unknown,
        }
    }
}

/// How date-valued columns are recognised for the outdated metric.
#[derive(Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum DateDetection {
    /// Only `Date` and `Datetime` columns.
    #[default]
    Declared,
    /// Declared columns, plus text columns whose name hints at a date and
    /// whose every non-null value parses as one.
    NameHinted,
}

/// Extra high-cardinality rule for text columns.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum CardinalityLimit {
    /// Flag when distinct values / row count exceeds the ratio.
    Ratio(f64),
    /// Flag when the distinct value count exceeds the limit.
    Distinct(usize),
}

impl Default for CardinalityLimit {
    fn default() -> Self {
        Self::Ratio(0.2)
    }
}

impl CardinalityLimit {
    pub fn is_exceeded(&self, distinct: usize, row_count: usize) -> bool {
        match *self {
            Self::Ratio(ratio) => {
                row_count > 0 && distinct as f64 / row_count as f64 > ratio
            }
            Self::Distinct(limit) => distinct > limit,
        }
    }
}

/// Tunables for one profiling run.
#[derive(Clone, Deserialize, Serialize, PartialEq, Debug)]
#[serde(default)]
pub struct ProfileOptions {
    /// Dates older than this many years count as outdated. Defaults to 2.
    pub staleness_years: u32,
    pub date_detection: DateDetection,
    /// Off by default: only case and whitespace variants mark a text column
    /// inconsistent. The historical high-cardinality rule (more than 20% of
    /// rows distinct, or more than 20 distinct values) is available as
    /// `Some(CardinalityLimit::default())` or
    /// `Some(CardinalityLimit::Distinct(20))`.
    pub cardinality_limit: Option<CardinalityLimit>,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            staleness_years: 2,
            date_detection: DateDetection::Declared,
            cardinality_limit: None,
        }
    }
}

/// Cleanup action suggested by a [`MetricReport`].
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    DropHighNullColumns,
    FillMissingValues,
    RemoveDuplicateRows,
    StandardizeTextCasing,
    FlagForArchival,
    ImmediateReview,
}

impl Recommendation {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::DropHighNullColumns => "drop-high-null-columns",
            Self::FillMissingValues => "fill-missing-values",
            Self::RemoveDuplicateRows => "remove-duplicate-rows",
            Self::StandardizeTextCasing => "standardize-text-casing",
            Self::FlagForArchival => "flag-for-archival",
            Self::ImmediateReview => "immediate-review",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DropHighNullColumns => "More than half of all cells are missing; drop sparse columns.",
            Self::FillMissingValues => "A small share of cells is missing; impute or fill them.",
            Self::RemoveDuplicateRows => "Exact duplicate rows are present; deduplicate.",
            Self::StandardizeTextCasing => {
                "Text columns hold case or whitespace variants of the same value."
            }
            Self::FlagForArchival => "Over 30% of rows carry stale dates; consider archiving.",
            Self::ImmediateReview => "Decay score is above 70; review this dataset.",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Clone, Deserialize, Serialize, PartialEq, Debug)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub null_count: usize,
    /// Distinct non-null values; only tracked for text columns.
    pub distinct_count: usize,
    pub date_column: bool,
    pub inconsistent: bool,
}

/// Result of one profiling run. Percentages are in `[0, 100]` and keep full
/// precision; `Display` rounds to two decimals.
#[derive(Clone, Deserialize, Serialize, PartialEq, Debug)]
pub struct MetricReport {
    pub row_count: usize,
    pub column_count: usize,
    pub null_percent: f64,
    pub duplicate_percent: f64,
    pub outdated_percent: f64,
    pub inconsistency_percent: f64,
    pub decay_score: f64,
    pub recommendations: Vec<Recommendation>,
    pub columns: Vec<ColumnProfile>,
}

impl MetricReport {
    pub fn components(&self) -> Components {
        Components {
            null_percent: self.null_percent,
            duplicate_percent: self.duplicate_percent,
            outdated_percent: self.outdated_percent,
            inconsistency_percent: self.inconsistency_percent,
        }
    }
}

impl fmt::Display for MetricReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {}  Columns: {}", self.row_count, self.column_count)?;
        writeln!(f, "Null %: {:.2}%", self.null_percent)?;
        writeln!(f, "Duplicate %: {:.2}%", self.duplicate_percent)?;
        writeln!(f, "Outdated %: {:.2}%", self.outdated_percent)?;
        writeln!(f, "Inconsistency %: {:.2}%", self.inconsistency_percent)?;
        write!(f, "Decay Score: {:.2}", self.decay_score)?;
        if !self.recommendations.is_empty() {
            writeln!(f)?;
            write!(f, "Recommendations:")?;
            for rec in &self.recommendations {
                write!(f, "\n  - {}: {}", rec.tag(), rec.description())?;
            }
        }
        Ok(())
    }
}
