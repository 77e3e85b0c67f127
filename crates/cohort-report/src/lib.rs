//! Descriptive reporting and CSV export.
//!
//! Summaries are written through an explicit `io::Write` sink so callers
//! decide where the report lands (a file under `results/reports` in the
//! pipeline, a buffer in tests).

mod descriptives;
mod export;

pub use descriptives::{ScaleSummary, value_counts, write_descriptives, write_report_file};
pub use export::export_analysis_csv;
