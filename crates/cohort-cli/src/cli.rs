//! CLI argument definitions for the cohort pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cohort-studio",
    version,
    about = "Cohort survey ETL - clean, score, and merge longitudinal survey waves",
    long_about = "Clean and recode longitudinal cohort-survey extracts, derive the\n\
                  prenatal smoking-exposure and pubertal-development scores, merge\n\
                  the waves into one analysis table, and write descriptive reports\n\
                  and figures."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline over a project folder.
    Run(RunArgs),

    /// Create the data/results directory skeleton.
    Init(InitArgs),

    /// List the catalogued survey variables.
    Variables,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Project folder holding `data/raw` with the survey extracts.
    #[arg(value_name = "PROJECT_FOLDER")]
    pub project_folder: PathBuf,

    /// Output root for processed data and results (default: PROJECT_FOLDER).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Load, transform, and score without writing any output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip figure generation.
    #[arg(long = "no-figures")]
    pub no_figures: bool,

    /// Skip the descriptive text report.
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// Scale variable pair for the scatter figure.
    #[arg(
        long = "scatter",
        num_args = 2,
        value_names = ["X", "Y"],
        default_values = ["SCORE_T", "PD"]
    )]
    pub scatter: Vec<String>,

    /// Group and value variables for the split-violin figure.
    #[arg(
        long = "violin",
        num_args = 2,
        value_names = ["GROUP", "VALUE"],
        default_values = ["FCCSEX00", "SCORE_T"]
    )]
    pub violin: Vec<String>,

    /// Natural-log transform the violin value variable.
    #[arg(long = "log-scale")]
    pub log_scale: bool,

    /// External modelling script to spawn with the exported CSV path.
    #[arg(long = "model-script", value_name = "PATH")]
    pub model_script: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Project folder to initialize.
    #[arg(value_name = "PROJECT_FOLDER")]
    pub project_folder: PathBuf,
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
