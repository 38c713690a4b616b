use anyhow::{Context as _, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use data_decay::cleaning::CleaningSummary;
use data_decay::config::load_options;
use data_decay::flows::{analyze_file, clean_file, default_output_path};
use data_decay::profiler::{CardinalityLimit, DateDetection, ProfileOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "data-decay", about = "Dataset decay scoring and cleanup tool")]
pub struct Cli {
    /// Also write logs to a daily-rotating file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a file and print its decay score
    Analyze {
        /// Path to the dataset (CSV, Parquet, JSON, XLSX/XLS/ODS)
        file: PathBuf,

        /// Reference date for staleness (defaults to now)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,

        /// Dates older than this many years count as outdated
        #[arg(long)]
        staleness_years: Option<u32>,

        /// Treat text columns with date-like names as date columns
        #[arg(long)]
        name_hints: bool,

        /// Flag text columns whose distinct/row ratio exceeds this value
        #[arg(long, conflicts_with = "cardinality_distinct")]
        cardinality_ratio: Option<f64>,

        /// Flag text columns with more than this many distinct values
        #[arg(long)]
        cardinality_distinct: Option<usize>,

        /// Path to a JSON profile options file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Deduplicate, drop null rows and save as CSV
    Clean {
        /// Path to the dataset (CSV, Parquet, JSON, XLSX/XLS/ODS)
        file: PathBuf,

        /// Output path. Defaults to cleaned_data.csv next to the input.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Analyze {
            file,
            as_of,
            staleness_years,
            name_hints,
            cardinality_ratio,
            cardinality_distinct,
            config,
            json,
        } => {
            let mut options = match config {
                Some(path) => load_options(&path)?,
                None => ProfileOptions::default(),
            };
            if let Some(years) = staleness_years {
                options.staleness_years = years;
            }
            if name_hints {
                options.date_detection = DateDetection::NameHinted;
            }
            if let Some(ratio) = cardinality_ratio {
                options.cardinality_limit = Some(CardinalityLimit::Ratio(ratio));
            } else if let Some(distinct) = cardinality_distinct {
                options.cardinality_limit = Some(CardinalityLimit::Distinct(distinct));
            }
            handle_analyze(&file, reference_time(as_of), &options, json)
        }
        Commands::Clean { file, output } => handle_clean(&file, output),
    }
}

fn reference_time(as_of: Option<NaiveDate>) -> DateTime<Utc> {
    as_of.map_or_else(Utc::now, |day| day.and_time(NaiveTime::MIN).and_utc())
}

fn handle_analyze(
    file: &Path,
    now: DateTime<Utc>,
    options: &ProfileOptions,
    json: bool,
) -> Result<()> {
    let response = analyze_file(file, now, options)
        .with_context(|| format!("Failed to analyze {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("File: {}", response.file_name);
    println!("{}", response.report);
    Ok(())
}

fn handle_clean(file: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| default_output_path(file));
    let summary = clean_file(file, &output)
        .with_context(|| format!("Failed to clean {}", file.display()))?;

    print_summary(&summary);
    println!("Saved to {}", output.display());
    Ok(())
}

fn print_summary(summary: &CleaningSummary) {
    println!("Input rows:             {}", summary.input_rows);
    println!("Duplicate rows removed: {}", summary.duplicate_rows_removed);
    println!("Null rows removed:      {}", summary.null_rows_removed);
    println!("Output rows:            {}", summary.output_rows);
}
