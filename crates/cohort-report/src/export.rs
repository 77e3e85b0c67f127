//! Analysis-table CSV export.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};

/// Write the analysis table to `path` as headered CSV, creating parent
/// directories. This file is the hand-off contract for any external
/// modelling script.
pub fn export_analysis_csv(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create export directory {}", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("create export {}", path.display()))?;
    let mut table = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut table)
        .with_context(|| format!("write export {}", path.display()))?;
    info!(path = %path.display(), rows = df.height(), "analysis table exported");
    Ok(())
}
