//! Plain-text descriptive summaries.
//!
//! Scale variables get count/mean/median/min/max twice, once over the raw
//! values and once with zeros masked to missing (the score fields default to
//! zero, so the masked row describes the exposed subgroup). Nominal variables
//! get a value-count table over the recoded `<code>_cat` labels when the
//! recode produced one, else over the raw codes (textual columns such as
//! `PDCAT` count as-is).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use cohort_ingest::format_numeric;
use cohort_model::{CAT_SUFFIX, VarKind, VariableCatalogue};
use cohort_transform::data_utils::{column_f64_values, column_str_values};
use polars::prelude::{DataFrame, DataType};

/// Five-number summary of a scale column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ScaleSummary {
    pub fn of(values: &[Option<f64>]) -> Self {
        let mut present: Vec<f64> = values.iter().filter_map(|v| *v).collect();
        present.sort_by(f64::total_cmp);
        let count = present.len();
        if count == 0 {
            return Self {
                count,
                mean: None,
                median: None,
                min: None,
                max: None,
            };
        }
        let mean = present.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 1 {
            present[count / 2]
        } else {
            (present[count / 2 - 1] + present[count / 2]) / 2.0
        };
        Self {
            count,
            mean: Some(mean),
            median: Some(median),
            min: Some(present[0]),
            max: Some(present[count - 1]),
        }
    }
}

/// Value counts of a nominal column, most frequent first; ties break on the
/// label so the output is deterministic. Missing cells are not counted.
pub fn value_counts(df: &DataFrame, code: &str) -> Result<Vec<(String, usize)>> {
    let labelled = format!("{code}{CAT_SUFFIX}");
    let values = if df.get_column_names_str().contains(&labelled.as_str()) {
        column_str_values(df, &labelled)?
    } else if df.column(code)?.dtype() == &DataType::String {
        // Columns derived as text, like PDCAT, carry their own labels.
        column_str_values(df, code)?
    } else {
        column_f64_values(df, code)?
            .into_iter()
            .map(|v| v.map(format_numeric))
            .collect()
    };

    let mut counts: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut rows: Vec<(String, usize)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(rows)
}

fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "-".to_string(),
    }
}

fn write_scale<W: Write>(out: &mut W, label: &str, summary: &ScaleSummary) -> Result<()> {
    writeln!(
        out,
        "  {label:<13} n={:<6} mean={:<10} median={:<10} min={:<10} max={}",
        summary.count,
        fmt_stat(summary.mean),
        fmt_stat(summary.median),
        fmt_stat(summary.min),
        fmt_stat(summary.max),
    )?;
    Ok(())
}

/// Write the full descriptive report for every catalogued variable present
/// in `df`. Variables the table does not carry are skipped silently; the
/// derived columns only exist after their pipeline stages ran.
pub fn write_descriptives<W: Write>(
    df: &DataFrame,
    vars: &VariableCatalogue,
    out: &mut W,
) -> Result<()> {
    let columns = df.get_column_names_str();

    writeln!(out, "== Scale variables ==")?;
    for var in vars.of_kind(VarKind::Scale) {
        if !columns.contains(&var.code) {
            continue;
        }
        let values = column_f64_values(df, var.code)?;
        writeln!(out, "\n{}  {}", var.code, var.name)?;
        write_scale(out, "raw:", &ScaleSummary::of(&values))?;
        let masked: Vec<Option<f64>> = values
            .into_iter()
            .map(|v| v.filter(|v| *v != 0.0))
            .collect();
        write_scale(out, "zeros masked:", &ScaleSummary::of(&masked))?;
    }

    writeln!(out, "\n== Nominal variables ==")?;
    for var in vars.of_kind(VarKind::Nominal) {
        if !columns.contains(&var.code) {
            continue;
        }
        writeln!(out, "\n{}  {}", var.code, var.name)?;
        for (label, count) in value_counts(df, var.code)? {
            writeln!(out, "  {label:<28} {count}")?;
        }
    }
    Ok(())
}

/// Write the descriptive report to `path`, creating parent directories.
pub fn write_report_file(df: &DataFrame, vars: &VariableCatalogue, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create report directory {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("create report {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_descriptives(df, vars, &mut out)?;
    out.flush().context("flush report")?;
    info!(path = %path.display(), "descriptive report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use cohort_model::VarSet;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(
                "SCORE_T".into(),
                vec![Some(0.0), Some(4.0), Some(8.0), None],
            )
            .into_column(),
            Series::new("FCCSEX00".into(), vec![Some(1.0), Some(2.0), Some(2.0), None])
                .into_column(),
            Series::new(
                "FCCSEX00_cat".into(),
                vec![Some("Male"), Some("Female"), Some("Female"), None],
            )
            .into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn summary_skips_missing_values() {
        let summary = ScaleSummary::of(&[Some(1.0), None, Some(3.0), Some(2.0)]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, Some(2.0));
        assert_eq!(summary.median, Some(2.0));
        assert_eq!(summary.min, Some(1.0));
        assert_eq!(summary.max, Some(3.0));
    }

    #[test]
    fn empty_summary_has_no_statistics() {
        let summary = ScaleSummary::of(&[None, None]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
    }

    #[test]
    fn value_counts_prefer_the_labelled_column() {
        let counts = value_counts(&frame(), "FCCSEX00").unwrap();
        assert_eq!(
            counts,
            vec![("Female".to_string(), 2), ("Male".to_string(), 1)]
        );
    }

    #[test]
    fn value_counts_read_textual_columns_directly() {
        let df = DataFrame::new(vec![
            Series::new(
                "PDCAT".into(),
                vec![Some("ontime"), Some("check"), Some("ontime"), Some("early")],
            )
            .into_column(),
        ])
        .unwrap();
        let counts = value_counts(&df, "PDCAT").unwrap();
        assert_eq!(
            counts,
            vec![
                ("ontime".to_string(), 2),
                ("check".to_string(), 1),
                ("early".to_string(), 1),
            ]
        );
    }

    #[test]
    fn report_masks_zeros_in_the_second_row() {
        let mut buffer: Vec<u8> = Vec::new();
        let vars = VariableCatalogue::new(VarSet::All);
        write_descriptives(&frame(), &vars, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("SCORE_T  Smoking score during preg"));
        // Raw: 0, 4, 8 -> mean 4. Masked: 4, 8 -> mean 6.
        assert!(text.contains("n=3"));
        assert!(text.contains("mean=4.0000"));
        assert!(text.contains("mean=6.0000"));
        assert!(text.contains("Female"));
    }
}
