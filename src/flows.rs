//! End-to-end flows used by the command-line host: load a file, profile or
//! clean it, and report what happened.

use crate::cleaning::{CleaningSummary, clean_with_summary};
use crate::error::{ResultExt as _, Result};
use crate::io::{CLEANED_FILE_NAME, load_df, save_csv};
use crate::profiler::{MetricReport, ProfileOptions, profile};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Clone, Serialize, Debug)]
pub struct AnalysisResponse {
    pub file_name: String,
    pub path: String,
    pub file_size: u64,
    pub report: MetricReport,
    #[serde(with = "duration_serde", rename = "analysis_duration")]
    pub duration: Duration,
}

mod duration_serde {
    use serde::{Serializer, ser::SerializeStruct as _};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Duration", 2)?;
        state.serialize_field("secs", &duration.as_secs())?;
        state.serialize_field("nanos", &duration.subsec_nanos())?;
        state.end()
    }
}

/// Loads `path` and profiles it against `now`.
///
/// # Errors
///
/// Propagates load errors (`UnsupportedFormat`, `Io`) and profiling errors.
pub fn analyze_file(
    path: &Path,
    now: DateTime<Utc>,
    options: &ProfileOptions,
) -> Result<AnalysisResponse> {
    let start = Instant::now();
    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    let df = load_df(path)?;
    let report = profile(&df, now, options)
        .with_context(|| format!("Failed to profile {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(AnalysisResponse {
        file_name,
        path: path.to_string_lossy().into_owned(),
        file_size,
        report,
        duration: start.elapsed(),
    })
}

/// `cleaned_data.csv` in the input's directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    input
        .parent()
        .map_or_else(|| PathBuf::from(CLEANED_FILE_NAME), |dir| dir.join(CLEANED_FILE_NAME))
}

/// Cleans `input` and writes the result to `output` as CSV.
///
/// # Errors
///
/// Propagates load, cleaning and write errors.
pub fn clean_file(input: &Path, output: &Path) -> Result<CleaningSummary> {
    let df = load_df(input)?;
    let (mut cleaned, summary) = clean_with_summary(&df)
        .with_context(|| format!("Failed to clean {}", input.display()))?;
    save_csv(&mut cleaned, output)?;

    tracing::info!("Saved cleaned dataset to {}", output.display());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_sits_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("/data/in/sales.csv")),
            PathBuf::from("/data/in/cleaned_data.csv")
        );
        assert_eq!(
            default_output_path(Path::new("sales.csv")),
            PathBuf::from("cleaned_data.csv")
        );
    }

    #[test]
    fn test_response_serializes_duration() -> Result<()> {
        let response = AnalysisResponse {
            file_name: "a.csv".to_owned(),
            path: "a.csv".to_owned(),
            file_size: 12,
            report: profile(&polars::prelude::DataFrame::empty(), Utc::now(), &ProfileOptions::default())?,
            duration: Duration::from_millis(1500),
        };
        let json = serde_json::to_value(&response)?;
        assert_eq!(json["analysis_duration"]["secs"], 1);
        assert_eq!(json["analysis_duration"]["nanos"], 500_000_000);
        Ok(())
    }
}
