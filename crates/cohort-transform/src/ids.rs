//! Respondent identifier construction.
//!
//! Cross-wave joins key on `ID` = study ID + "_" + person number. Each wave's
//! files name the person-number column with their own prefix (`APNUM00`,
//! `FCNUM00`).

use anyhow::{Context, Result};
use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use cohort_ingest::format_numeric;
use cohort_model::{RESPONDENT_ID, STUDY_ID};

use crate::data_utils::{column_f64_values, column_str_values};

/// Concatenate a study ID and person number into the respondent identifier.
pub fn make_id(study_id: &str, person_number: f64) -> String {
    format!("{study_id}_{}", format_numeric(person_number))
}

/// Insert the derived `ID` column at position 0.
///
/// Rows with a missing study ID or person number get a null identifier; they
/// cannot take part in any ID-keyed join. The pandas original produced
/// literal `"<id>_nan"` strings there instead.
pub fn build_respondent_id(df: &mut DataFrame, id_prefix: &str) -> Result<()> {
    let person_column = format!("{id_prefix}NUM00");
    let study_ids = column_str_values(df, STUDY_ID)?;
    let person_numbers = column_f64_values(df, &person_column)?;

    let ids: Vec<Option<String>> = study_ids
        .iter()
        .zip(person_numbers.iter())
        .map(|(study, person)| match (study, person) {
            (Some(study), Some(person)) => Some(make_id(study, *person)),
            _ => None,
        })
        .collect();
    let populated = ids.iter().filter(|id| id.is_some()).count();

    let series = Series::new(RESPONDENT_ID.into(), ids);
    df.insert_column(0, series)
        .context("insert ID column")?;
    debug!(rows = df.height(), populated, "respondent IDs built");
    Ok(())
}
