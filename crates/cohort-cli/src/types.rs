use std::path::PathBuf;

use serde::Serialize;

/// Row count and timing of one pipeline stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageSummary {
    pub stage: &'static str,
    pub rows: usize,
    pub duration_ms: u128,
}

/// Outcome of a full pipeline run.
#[derive(Debug)]
pub struct RunResult {
    pub root: PathBuf,
    pub stages: Vec<StageSummary>,
    pub outputs: Vec<PathBuf>,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

/// Machine-readable run manifest written next to the text report.
#[derive(Debug, Serialize)]
pub struct RunManifest {
    pub root: String,
    pub stages: Vec<StageSummary>,
    pub outputs: Vec<String>,
    pub errors: Vec<String>,
}

impl RunManifest {
    pub fn from_result(result: &RunResult) -> Self {
        Self {
            root: result.root.display().to_string(),
            stages: result.stages.clone(),
            outputs: result
                .outputs
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
            errors: result.errors.clone(),
        }
    }
}
