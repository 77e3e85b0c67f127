//! Analysis-row cleaning.

use anyhow::{Context, Result};
use tracing::debug;

use polars::prelude::{BooleanChunked, DataFrame};

use crate::data_utils::is_missing;

/// Keep only rows where every listed column is populated.
///
/// Used to restrict the exported analysis table to respondents complete on
/// the regression variable set. Columns may be numeric or textual; an empty
/// string counts as missing.
pub fn drop_incomplete(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    for name in columns {
        df.column(name)
            .with_context(|| format!("column '{name}' not found"))?;
    }
    let mask: BooleanChunked = (0..df.height())
        .map(|idx| Some(columns.iter().all(|name| !is_missing(df, name, idx))))
        .collect();
    let filtered = df.filter(&mask).context("filter incomplete rows")?;
    debug!(
        before = df.height(),
        after = filtered.height(),
        "incomplete analysis rows dropped"
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn drops_rows_with_any_missing_listed_value() {
        let df = DataFrame::new(vec![
            Series::new(
                "PDCAT".into(),
                vec![Some("ontime".to_string()), Some("early".to_string()), None],
            )
            .into_column(),
            Series::new("SCORE_T".into(), vec![Some(1.0), None, Some(3.0)]).into_column(),
        ])
        .unwrap();
        let filtered = drop_incomplete(&df, &["PDCAT", "SCORE_T"]).unwrap();
        assert_eq!(filtered.height(), 1);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let df = DataFrame::new(vec![
            Series::new("A".into(), vec![Some(1.0)]).into_column(),
        ])
        .unwrap();
        assert!(drop_incomplete(&df, &["A", "NOPE"]).is_err());
    }
}
