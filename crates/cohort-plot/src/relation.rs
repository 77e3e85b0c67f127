//! Pairwise figures: scatter and sex-split violin.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::prelude::*;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use cohort_model::VarDef;
use cohort_transform::data_utils::column_f64_values;

use crate::common::{FIGURE_SIZE, kernel_density, padded_range};

const KDE_POINTS: usize = 60;
/// Half-width of a violin body in group-axis units.
const VIOLIN_HALF_WIDTH: f64 = 0.4;

/// Scatter of two scale variables over rows where both are present. The
/// figure lands at `<dir>/<x>_<y>.svg`.
pub fn scatter_plot(df: &DataFrame, x: &VarDef, y: &VarDef, dir: &Path) -> Result<PathBuf> {
    let xs = column_f64_values(df, x.code)?;
    let ys = column_f64_values(df, y.code)?;
    let pairs: Vec<(f64, f64)> = xs
        .into_iter()
        .zip(ys)
        .filter_map(|(x, y)| Some((x?, y?)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    std::fs::create_dir_all(dir)
        .with_context(|| format!("create figure directory {}", dir.display()))?;
    let path = dir.join(format!("{}_{}.svg", x.code, y.code));
    let x_values: Vec<f64> = pairs.iter().map(|(x, _)| *x).collect();
    let y_values: Vec<f64> = pairs.iter().map(|(_, y)| *y).collect();
    let (x_lo, x_hi) = padded_range(&x_values);
    let (y_lo, y_hi) = padded_range(&y_values);

    {
        let root = SVGBackend::new(&path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{} vs {}", x.name, y.name), ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
        chart
            .configure_mesh()
            .x_desc(x.name)
            .y_desc(y.name)
            .draw()?;
        chart.draw_series(
            pairs
                .iter()
                .map(|(px, py)| Circle::new((*px, *py), 3, BLUE.mix(0.5).filled())),
        )?;
        root.present()?;
    }
    info!(path = %path.display(), points = pairs.len(), "scatter figure written");
    Ok(path)
}

/// Split-violin figure of a scale variable partitioned by a nominal group
/// variable, one kernel-density body per observed group code. With
/// `log_scale` the values are natural-log transformed first (non-positive
/// values drop out). The figure lands at `<dir>/<group>_<value>.svg`.
pub fn violin_plot(
    df: &DataFrame,
    group: &VarDef,
    value: &VarDef,
    log_scale: bool,
    dir: &Path,
) -> Result<PathBuf> {
    let groups = column_f64_values(df, group.code)?;
    let values = column_f64_values(df, value.code)?;

    let mut codes: Vec<i64> = groups
        .iter()
        .copied()
        .filter_map(|g| g.filter(|g| g.fract() == 0.0).map(|g| g as i64))
        .collect();
    codes.sort_unstable();
    codes.dedup();

    let mut bodies: Vec<(i64, Vec<f64>)> = Vec::new();
    let mut all_values: Vec<f64> = Vec::new();
    for code in codes {
        let members: Vec<f64> = groups
            .iter()
            .zip(&values)
            .filter(|(g, _)| **g == Some(code as f64))
            .filter_map(|(_, v)| *v)
            .map(|v| if log_scale { v.ln() } else { v })
            .filter(|v| v.is_finite())
            .collect();
        if members.is_empty() {
            debug!(group = group.code, code, "empty group skipped");
            continue;
        }
        all_values.extend_from_slice(&members);
        bodies.push((code, members));
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("create figure directory {}", dir.display()))?;
    let path = dir.join(format!("{}_{}.svg", group.code, value.code));
    let (y_lo, y_hi) = padded_range(&all_values);
    let x_hi = bodies.len().max(1) as f64;
    let positions: Vec<(f64, i64)> = bodies
        .iter()
        .enumerate()
        .map(|(idx, (code, _))| (idx as f64 + 0.5, *code))
        .collect();

    let y_desc = if log_scale {
        format!("ln({})", value.name)
    } else {
        value.name.to_string()
    };
    {
        let root = SVGBackend::new(&path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} by {}", value.name, group.name),
                ("sans-serif", 20),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..x_hi, y_lo..y_hi)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bodies.len())
            .x_label_formatter(&|x| {
                positions
                    .iter()
                    .find(|(center, _)| (x - center).abs() < 0.5)
                    .map(|(_, code)| code.to_string())
                    .unwrap_or_default()
            })
            .x_desc(group.name)
            .y_desc(y_desc)
            .draw()?;

        for (idx, (_, members)) in bodies.iter().enumerate() {
            let center = idx as f64 + 0.5;
            let curve = kernel_density(members, KDE_POINTS);
            let peak = curve
                .iter()
                .map(|(_, d)| *d)
                .fold(f64::MIN, f64::max)
                .max(f64::MIN_POSITIVE);
            let scale = VIOLIN_HALF_WIDTH / peak;
            let mut outline: Vec<(f64, f64)> = curve
                .iter()
                .map(|(y, d)| (center + d * scale, *y))
                .collect();
            outline.extend(curve.iter().rev().map(|(y, d)| (center - d * scale, *y)));
            chart.draw_series(std::iter::once(Polygon::new(
                outline.clone(),
                BLUE.mix(0.4).filled(),
            )))?;
            chart.draw_series(std::iter::once(PathElement::new(outline, BLUE)))?;
        }
        root.present()?;
    }
    info!(path = %path.display(), groups = bodies.len(), "violin figure written");
    Ok(path)
}
