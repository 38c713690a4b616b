//! File boundary: loading uploads into a `DataFrame` and exporting the
//! cleaned dataset as CSV.

mod spreadsheet;

use crate::error::{DecayError, ResultExt as _, Result};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// File name offered for the cleaned download.
pub const CLEANED_FILE_NAME: &str = "cleaned_data.csv";

const INFER_SCHEMA_ROWS: usize = 10_000;

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn csv_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .map_parse_options(|opts| opts.with_try_parse_dates(true))
}

/// Loads a file by extension: `.csv`, `.parquet`, `.json`, or a spreadsheet
/// (`.xlsx`, `.xlsm`, `.xls`, `.ods`, first worksheet).
///
/// # Errors
///
/// Returns `UnsupportedFormat` for unknown extensions, and
/// `Io`/`DataProcessing` errors when the file cannot be read or parsed.
pub fn load_df(path: &Path) -> Result<DataFrame> {
    let ext = extension(path);
    let df = match ext.as_str() {
        "csv" => read_csv_path(path)?,
        "parquet" => ParquetReader::new(std::fs::File::open(path)?)
            .finish()
            .context("Failed to read Parquet")?,
        "json" => JsonReader::new(std::fs::File::open(path)?)
            .finish()
            .context("Failed to read JSON")?,
        ext if spreadsheet::EXTENSIONS.contains(&ext) => spreadsheet::read_first_sheet(path)?,
        _ => {
            return Err(DecayError::UnsupportedFormat(format!(
                "unsupported file extension: '{ext}'"
            )));
        }
    };

    tracing::info!(
        "Loaded {} ({} rows x {} columns)",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// # Errors
///
/// Returns an error if the CSV cannot be opened or parsed.
pub fn read_csv_path(path: &Path) -> Result<DataFrame> {
    csv_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .with_context(|| format!("Failed to read CSV {}", path.display()))
}

/// Parses an in-memory CSV upload.
///
/// # Errors
///
/// Returns an error if the bytes are not valid CSV.
pub fn read_csv_bytes(bytes: &[u8]) -> Result<DataFrame> {
    csv_options()
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .context("Failed to read CSV upload")
}

/// Comma separated, header row, UTF-8.
///
/// # Errors
///
/// Returns an error if polars cannot serialize a column.
pub fn to_csv_bytes(df: &mut DataFrame) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .with_separator(b',')
        .finish(df)
        .context("Failed to serialize dataframe to CSV")?;
    Ok(buf)
}

/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .context("Failed to write CSV file")?;
    Ok(())
}
