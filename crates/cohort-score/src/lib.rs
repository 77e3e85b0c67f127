//! Composite score derivations.
//!
//! Two derived measures: the trimester-weighted smoking-exposure score from
//! the wave-1 smoking-habit items, and the pubertal-development score and
//! category from the wave-6 pubertal items. Both are computed once on the
//! typed tables and never mutated afterwards.

mod pubertal;
mod smoking;

pub use pubertal::{PdCategory, classify_pd, derive_pd_category, derive_pd_score};
pub use smoking::{clean_smoking_habit, derive_smoking_scores, trimester_subscore};
