//! Per-variable summary figures.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use cohort_model::{VarDef, VarKind, VariableCatalogue};
use cohort_report::value_counts;

use crate::common::{FIGURE_SIZE, histogram_bins, padded_range, present_values};

const HIST_BINS: usize = 10;
/// Pixel height of the boxplot strip above each histogram.
const BOX_STRIP_HEIGHT: u32 = 120;

/// Bar chart of category counts for a nominal variable.
pub fn bar_chart(df: &DataFrame, var: &VarDef, path: &Path) -> Result<()> {
    let counts = value_counts(df, var.code)?;
    if counts.is_empty() {
        debug!(code = var.code, "no observed categories, figure skipped");
        return Ok(());
    }
    let labels: Vec<String> = counts.iter().map(|(label, _)| label.clone()).collect();
    let max_count = counts.iter().map(|(_, count)| *count).max().unwrap_or(1);

    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(var.name, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(50)
        .build_cartesian_2d(0i32..counts.len() as i32, 0f64..max_count as f64 * 1.1)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Count")
        .x_labels(counts.len())
        .x_label_formatter(&|idx| {
            labels
                .get(*idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()?;
    chart.draw_series(counts.iter().enumerate().map(|(idx, (_, count))| {
        Rectangle::new(
            [(idx as i32, 0.0), (idx as i32 + 1, *count as f64)],
            BLUE.filled(),
        )
    }))?;
    root.present()?;
    Ok(())
}

/// Histogram of a scale variable with a boxplot strip above, sharing the
/// x-axis range. Missing values are dropped first.
pub fn hist_boxplot(df: &DataFrame, var: &VarDef, path: &Path) -> Result<()> {
    let values = present_values(df, var.code)?;
    if values.is_empty() {
        debug!(code = var.code, "no observed values, figure skipped");
        return Ok(());
    }
    let (lo, hi) = padded_range(&values);
    let bins = histogram_bins(&values, lo, hi, HIST_BINS);
    let max_count = bins.iter().map(|(_, count)| *count).max().unwrap_or(1);

    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (strip, body) = root.split_vertically(BOX_STRIP_HEIGHT);

    let mut box_chart = ChartBuilder::on(&strip)
        .margin(10)
        .x_label_area_size(0)
        .y_label_area_size(50)
        .build_cartesian_2d(lo as f32..hi as f32, 0f32..2f32)?;
    // Quartiles is f32-valued, so the strip chart is too.
    box_chart.draw_series(std::iter::once(
        Boxplot::new_horizontal(1.0f32, &Quartiles::new(&values)).width(24),
    ))?;

    let width = (hi - lo) / HIST_BINS as f64;
    let mut chart = ChartBuilder::on(&body)
        .caption(var.name, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(lo..hi, 0f64..max_count as f64 * 1.1)?;
    chart.configure_mesh().y_desc("Count").draw()?;
    chart.draw_series(bins.iter().map(|(start, count)| {
        Rectangle::new([(*start, 0.0), (start + width, *count as f64)], BLUE.filled())
    }))?;
    root.present()?;
    Ok(())
}

/// Write one figure per catalogued variable present in the table. Nominal
/// variables get bar charts, scale variables get histogram+boxplot figures;
/// identifiers are never plotted. Returns the figure paths written.
pub fn summary_figures(
    df: &DataFrame,
    vars: &VariableCatalogue,
    dir: &Path,
) -> Result<Vec<std::path::PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create figure directory {}", dir.display()))?;
    let columns = df.get_column_names_str();
    let mut written = Vec::new();
    for var in vars.iter() {
        if !columns.contains(&var.code) {
            continue;
        }
        let path = dir.join(format!("{}.svg", var.code));
        match var.kind {
            VarKind::Nominal => bar_chart(df, var, &path)
                .with_context(|| format!("bar chart for {}", var.code))?,
            VarKind::Scale => hist_boxplot(df, var, &path)
                .with_context(|| format!("histogram for {}", var.code))?,
            VarKind::Id => continue,
        }
        if path.exists() {
            written.push(path);
        }
    }
    info!(figures = written.len(), dir = %dir.display(), "summary figures written");
    Ok(written)
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
                vec![Some(0.0), Some(2.5), Some(7.0), None, Some(4.0)],
            )
            .into_column(),
            Series::new(
                "FCCSEX00_cat".into(),
                vec![Some("Male"), Some("Female"), Some("Female"), None, Some("Male")],
            )
            .into_column(),
            Series::new(
                "FCCSEX00".into(),
                vec![Some(1.0), Some(2.0), Some(2.0), None, Some(1.0)],
            )
            .into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn summary_figures_cover_present_variables_only() {
        let dir = tempfile::tempdir().unwrap();
        let vars = VariableCatalogue::new(VarSet::All);
        let written = summary_figures(&frame(), &vars, dir.path()).unwrap();
        let names: Vec<String> = written
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(names, vec!["SCORE_T.svg", "FCCSEX00.svg"]);
        for path in &written {
            let text = std::fs::read_to_string(path).unwrap();
            assert!(text.contains("<svg"));
        }
    }

    #[test]
    fn empty_column_writes_no_figure() {
        let df = DataFrame::new(vec![
            Series::new("SCORE_T".into(), Vec::<Option<f64>>::new()).into_column(),
        ])
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let var = VariableCatalogue::new(VarSet::All);
        let written = summary_figures(&df, &var, dir.path()).unwrap();
        assert!(written.is_empty());
    }
}
