//! Wave merging.
//!
//! Intra-wave and cross-wave merges are inner joins on the derived `ID`; the
//! family-level file joins on the base study ID. Joins go through the lazy
//! engine and duplicate right-hand key columns are dropped afterwards.

use anyhow::{Context, Result};
use tracing::debug;

use cohort_model::{RESPONDENT_ID, STUDY_ID};
use polars::prelude::{DataFrame, IntoLazy, JoinArgs, JoinType, col};

/// Inner-join two tables on `key`, dropping suffixed duplicate columns.
pub fn inner_join_on(left: &DataFrame, right: &DataFrame, key: &str) -> Result<DataFrame> {
    let joined = left
        .clone()
        .lazy()
        .join(
            right.clone().lazy(),
            [col(key)],
            [col(key)],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()
        .with_context(|| format!("inner join on {key}"))?;
    let duplicates: Vec<String> = joined
        .get_column_names()
        .iter()
        .filter(|name| name.as_str().ends_with("_right"))
        .map(|name| name.to_string())
        .collect();
    let mut joined = joined;
    for name in duplicates {
        let _ = joined.drop_in_place(&name).context("drop joined duplicate")?;
    }
    debug!(key, rows = joined.height(), "tables joined");
    Ok(joined)
}

/// Join the two wave tables on the respondent identifier.
pub fn merge_waves(wave1: &DataFrame, wave6: &DataFrame) -> Result<DataFrame> {
    inner_join_on(wave1, wave6, RESPONDENT_ID)
}

/// Join the longitudinal family file on the base study ID.
pub fn join_family(merged: &DataFrame, family: &DataFrame) -> Result<DataFrame> {
    inner_join_on(merged, family, STUDY_ID)
}
