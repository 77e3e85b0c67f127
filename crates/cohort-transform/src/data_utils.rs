//! DataFrame value access and column rewriting helpers.
//!
//! The derivations in this workspace are row-wise business rules, so tables
//! are read into plain vectors, transformed, and written back as whole
//! columns keyed by name.

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};

use cohort_ingest::{any_to_f64, any_to_string};

/// Collect a numeric column as `Option<f64>` per row.
pub fn column_f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)
        .with_context(|| format!("column '{name}' not found"))?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_f64(series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Collect a string column; null and empty cells become `None`.
pub fn column_str_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)
        .with_context(|| format!("column '{name}' not found"))?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let text = any_to_string(series.get(idx).unwrap_or(AnyValue::Null));
        let trimmed = text.trim();
        if trimmed.is_empty() {
            values.push(None);
        } else {
            values.push(Some(trimmed.to_string()));
        }
    }
    Ok(values)
}

/// Write (or overwrite) a Float64 column.
pub fn set_f64_column(df: &mut DataFrame, name: &str, values: Vec<Option<f64>>) -> Result<()> {
    df.with_column(Series::new(name.into(), values))
        .with_context(|| format!("set column '{name}'"))?;
    Ok(())
}

/// Write (or overwrite) a String column.
pub fn set_str_column(df: &mut DataFrame, name: &str, values: Vec<Option<String>>) -> Result<()> {
    df.with_column(Series::new(name.into(), values))
        .with_context(|| format!("set column '{name}'"))?;
    Ok(())
}

/// True when the cell at `idx` is null or an empty string.
pub fn is_missing(df: &DataFrame, name: &str, idx: usize) -> bool {
    let Ok(series) = df.column(name) else {
        return true;
    };
    match series.get(idx).unwrap_or(AnyValue::Null) {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        _ => false,
    }
}
