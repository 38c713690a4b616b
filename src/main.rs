//! Command-line host for the data decay profiler.
//!
//! ```bash
//! data-decay analyze data.csv --as-of 2026-01-01
//! data-decay clean data.csv --output cleaned_data.csv
//! ```

#![expect(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::Parser as _;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(err) = data_decay::logging::init(cli.log_dir.as_deref()) {
        eprintln!("Warning: logging disabled: {err:#}");
    }

    match cli::run_command(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("Error processing file: {err:#}");
            ExitCode::FAILURE
        }
    }
}
