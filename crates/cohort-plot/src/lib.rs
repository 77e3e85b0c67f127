//! Descriptive figures.
//!
//! One SVG per catalogued variable (bar charts for nominal variables,
//! histogram with a boxplot strip for scale variables) plus pairwise scatter
//! and sex-split violin figures, all written under `results/figures`.

mod common;
mod relation;
mod summary;

pub use relation::{scatter_plot, violin_plot};
pub use summary::{bar_chart, hist_boxplot, summary_figures};
