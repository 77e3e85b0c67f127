//! Nominal recoding.
//!
//! Adds a `<code>_cat` text column next to every nominal variable present in
//! the table, decoding raw codes through the catalogue's label maps. Codes
//! outside a map (and nulls) stay null in the label column.

use anyhow::Result;
use tracing::debug;

use cohort_model::{CAT_SUFFIX, VarKind, VarSet, catalogue, category_labels};
use polars::prelude::DataFrame;

use crate::data_utils::{column_f64_values, set_str_column};

/// Recode every nominal catalogue variable found in `df`.
///
/// Returns the number of label columns added. `PDCAT` is skipped; its values
/// are already textual.
pub fn add_category_columns(df: &mut DataFrame) -> Result<usize> {
    let labels = category_labels();
    let mut added = 0usize;
    for var in catalogue(VarSet::All) {
        if var.kind != VarKind::Nominal || var.code == "PDCAT" {
            continue;
        }
        if df.column(var.code).is_err() {
            continue;
        }
        let Some(map) = labels.get(var.code) else {
            continue;
        };
        let raw = column_f64_values(df, var.code)?;
        let decoded: Vec<Option<String>> = raw
            .iter()
            .map(|value| {
                value
                    .and_then(|v| map.decode(v))
                    .map(ToString::to_string)
            })
            .collect();
        set_str_column(df, &format!("{}{CAT_SUFFIX}", var.code), decoded)?;
        added += 1;
    }
    debug!(added, "category label columns added");
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn recodes_known_codes_and_nulls_the_rest() {
        let mut df = DataFrame::new(vec![
            Series::new(
                "APSMCH00".into(),
                vec![Some(1.0), Some(2.0), Some(3.0), Some(7.0), None],
            )
            .into_column(),
        ])
        .unwrap();
        let added = add_category_columns(&mut df).unwrap();
        assert_eq!(added, 1);
        let cat = df.column("APSMCH00_cat").unwrap();
        let texts: Vec<String> = (0..df.height())
            .map(|idx| cohort_ingest::any_to_string(cat.get(idx).unwrap()))
            .collect();
        assert_eq!(texts, vec!["Yes", "No", "Can't remember", "", ""]);
    }
}
