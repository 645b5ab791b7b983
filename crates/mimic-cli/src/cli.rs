//! CLI argument definitions for the cohort normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mimic-normalize",
    version,
    about = "MIMIC cohort field normalizer - map raw cohort fields to canonical labels",
    long_about = "Normalize raw categorical and temporal fields from a MIMIC-IV-style\n\
                  cohort extract into the canonical labels used for cohort analysis.\n\
                  Writes one <field>_label column per recognized source column."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row-level values in logs.
    ///
    /// Cohort rows carry patient-derived values; by default they are
    /// replaced with a redaction token in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a cohort extract and write the labeled output.
    Cohort(CohortArgs),

    /// List supported fields and their canonical labels.
    Fields,
}

#[derive(Parser)]
pub struct CohortArgs {
    /// Path to the cohort extract CSV.
    #[arg(value_name = "COHORT_CSV")]
    pub csv: PathBuf,

    /// Output directory for the labeled file (default: <CSV_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Normalize and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Impute missing heights with the cohort mean before BMI classification.
    #[arg(long = "impute-height")]
    pub impute_height: bool,

    /// Exit non-zero when any row-level issue is recorded.
    #[arg(long = "strict")]
    pub strict: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
