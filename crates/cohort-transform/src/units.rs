//! Birth-weight unit conversion.

use anyhow::Result;
use std::collections::BTreeMap;
use tracing::debug;

use cohort_model::RESPONDENT_ID;
use polars::prelude::DataFrame;

use crate::data_utils::{column_f64_values, column_str_values, set_f64_column};

const WEIGHT_LB: &str = "APWTLB00";
const WEIGHT_OZ: &str = "APWTOU00";
const WEIGHT_KG: &str = "APWTKG00";

/// Kilograms per ounce.
pub const OUNCE_TO_KG: f64 = 0.028_349_523_1;

/// Convert a pounds + ounces reading to kilograms.
pub fn lboz_to_kg(pounds: f64, ounces: f64) -> f64 {
    (pounds * 16.0 + ounces) * OUNCE_TO_KG
}

/// Overwrite `APWTKG00` with the kg conversion of the lb/oz columns.
///
/// Duplicated identifiers are resolved by keeping the first conversion, and
/// only strictly-positive converted values replace the existing kilogram
/// figure; every row sharing the identifier receives the replacement.
/// Returns the number of rows updated.
pub fn convert_birth_weight(df: &mut DataFrame) -> Result<usize> {
    let ids = column_str_values(df, RESPONDENT_ID)?;
    let pounds = column_f64_values(df, WEIGHT_LB)?;
    let ounces = column_f64_values(df, WEIGHT_OZ)?;
    let mut kilograms = column_f64_values(df, WEIGHT_KG)?;

    // First duplicate wins.
    let mut replacements: BTreeMap<String, f64> = BTreeMap::new();
    for idx in 0..df.height() {
        let Some(id) = ids[idx].as_ref() else {
            continue;
        };
        let (Some(lb), Some(oz)) = (pounds[idx], ounces[idx]) else {
            continue;
        };
        let kg = lboz_to_kg(lb, oz);
        if kg > 0.0 {
            replacements.entry(id.clone()).or_insert(kg);
        }
    }

    let mut updated = 0usize;
    for idx in 0..df.height() {
        let Some(id) = ids[idx].as_ref() else {
            continue;
        };
        if let Some(kg) = replacements.get(id) {
            kilograms[idx] = Some(*kg);
            updated += 1;
        }
    }
    set_f64_column(df, WEIGHT_KG, kilograms)?;
    debug!(rows = df.height(), updated, "birth weight converted");
    Ok(updated)
}
