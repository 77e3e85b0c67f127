//! Typed extract loading.
//!
//! Turns a raw [`TabTable`] into a polars DataFrame: the leading study-ID
//! column stays a string, every selected column becomes Float64 with sentinel
//! codes mapped to null. Load-time value recodes (the wave-6 menarche item)
//! are applied after sentinel normalization.

use std::path::Path;

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::debug;

use cohort_model::{CaseInsensitiveSet, STUDY_ID, SurveyFile};

use crate::error::{IngestError, Result};
use crate::polars_utils::parse_f64;
use crate::tab_table::read_tab_table;

/// A single value substitution applied at load time.
#[derive(Debug, Clone, Copy)]
pub struct ValueRecode {
    pub column: &'static str,
    pub from: f64,
    pub to: f64,
}

/// Options controlling how an extract is typed.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Codes mapped to null.
    pub sentinels: Vec<f64>,
    /// Columns read beyond the leading study-ID column, in output order.
    pub columns: Vec<String>,
    /// Substitutions applied after sentinel normalization.
    pub recodes: Vec<ValueRecode>,
}

impl LoadOptions {
    /// Options for one of the catalogued survey files.
    pub fn for_file(file: &SurveyFile) -> Self {
        Self {
            sentinels: file.sentinels(),
            columns: file.columns.iter().map(|c| (*c).to_string()).collect(),
            recodes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_recodes(mut self, recodes: Vec<ValueRecode>) -> Self {
        self.recodes = recodes;
        self
    }
}

/// Load a tab-separated extract into a typed DataFrame.
///
/// The first file column is taken as the study ID regardless of the selected
/// columns. Selected columns are resolved case-insensitively; a missing
/// column or a non-numeric cell aborts the load.
pub fn load_extract(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let table = read_tab_table(path)?;
    if table.headers.is_empty() {
        return Err(IngestError::EmptyExtract {
            path: path.to_path_buf(),
        });
    }

    let lookup = CaseInsensitiveSet::new(&table.headers);
    let mut column_indexes = Vec::with_capacity(options.columns.len());
    for name in &options.columns {
        let resolved = lookup
            .get(name)
            .ok_or_else(|| IngestError::MissingColumn {
                column: name.clone(),
                path: path.to_path_buf(),
            })?;
        let idx = table
            .headers
            .iter()
            .position(|h| h == resolved)
            .expect("resolved header present");
        column_indexes.push((name.as_str(), idx));
    }

    let ids: Vec<String> = table.rows.iter().map(|row| row[0].clone()).collect();
    let mut columns: Vec<Column> =
        vec![Series::new(STUDY_ID.into(), ids).into()];

    for (name, idx) in column_indexes {
        let mut values: Vec<Option<f64>> = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let cell = row[idx].as_str();
            if cell.is_empty() {
                values.push(None);
                continue;
            }
            let parsed = parse_f64(cell).ok_or_else(|| IngestError::InvalidValue {
                column: name.to_string(),
                value: cell.to_string(),
                path: path.to_path_buf(),
            })?;
            let normalized = if options.sentinels.contains(&parsed) {
                None
            } else {
                Some(parsed)
            };
            values.push(apply_recodes(normalized, name, &options.recodes));
        }
        columns.push(Series::new(name.into(), values).into());
    }

    let df = DataFrame::new(columns).map_err(|source| IngestError::Frame {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "extract loaded"
    );
    Ok(df)
}

fn apply_recodes(value: Option<f64>, column: &str, recodes: &[ValueRecode]) -> Option<f64> {
    let value = value?;
    for recode in recodes {
        if recode.column == column && value == recode.from {
            return Some(recode.to);
        }
    }
    Some(value)
}
