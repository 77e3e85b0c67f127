//! Directory contract.
//!
//! The pipeline expects `data/raw` for inputs and creates `data/processed`,
//! `results/figures`, and `results/reports` before any load or write.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{IngestError, Result};

/// Resolved project directories.
#[derive(Debug, Clone)]
pub struct ProjectDirs {
    pub raw: PathBuf,
    pub processed: PathBuf,
    pub figures: PathBuf,
    pub reports: PathBuf,
}

/// Create the data and results directory trees under `root`.
pub fn setup_directories(root: &Path) -> Result<ProjectDirs> {
    let dirs = ProjectDirs {
        raw: root.join("data").join("raw"),
        processed: root.join("data").join("processed"),
        figures: root.join("results").join("figures"),
        reports: root.join("results").join("reports"),
    };
    for path in [&dirs.raw, &dirs.processed, &dirs.figures, &dirs.reports] {
        fs::create_dir_all(path).map_err(|source| IngestError::DirectoryCreate {
            path: path.clone(),
            source,
        })?;
    }
    info!(root = %root.display(), "directories ready");
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_the_full_tree() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = setup_directories(dir.path()).unwrap();
        assert!(dirs.raw.is_dir());
        assert!(dirs.processed.is_dir());
        assert!(dirs.figures.is_dir());
        assert!(dirs.reports.is_dir());
        // Idempotent on rerun.
        setup_directories(dir.path()).unwrap();
    }
}
