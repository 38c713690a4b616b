//! # Data Decay - Dataset Quality Scoring
//!
//! Measures how "decayed" a tabular dataset is along four dimensions
//! (missing cells, duplicate rows, outdated dates, inconsistent text),
//! combines them into a single decay score, and recommends cleanup actions.
//! A fixed cleaning transform removes duplicate rows and rows with nulls.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chrono::Utc;
//! use data_decay::{ProfileOptions, clean, io, profile};
//!
//! let df = io::load_df("sales.csv".as_ref())?;
//! let report = profile(&df, Utc::now(), &ProfileOptions::default())?;
//! println!("{report}");
//!
//! let mut cleaned = clean(&df)?;
//! io::save_csv(&mut cleaned, io::CLEANED_FILE_NAME.as_ref())?;
//! # Ok::<(), data_decay::error::DecayError>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`profiler`]: Metric computation, decay scoring and recommendations
//! - [`cleaning`]: The deduplicate-then-drop-nulls transform
//! - [`dataset`]: Building frames from row-oriented cells
//! - [`io`]: Loading files and exporting CSV
//! - [`flows`]: File-level analyze and clean flows
//! - [`config`]: Profile options from JSON
//! - [`error`]: Error types and handling utilities
//! - [`logging`]: Subscriber setup for hosts
//!
//! The core never reads the clock: callers pass the reference time to
//! [`profile`], so results are reproducible.

pub mod cleaning;
pub mod config;
pub mod dataset;
pub mod error;
pub mod flows;
pub mod io;
pub mod logging;
pub mod profiler;

pub use cleaning::{CleaningSummary, clean, clean_with_summary};
pub use profiler::{MetricReport, ProfileOptions, Recommendation, profile};
