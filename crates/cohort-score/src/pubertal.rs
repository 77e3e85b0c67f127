//! Pubertal-development score and category.
//!
//! The score is the mean of the sex-specific pubertal item subset; the
//! category compares each respondent's score to same-sex peers interviewed
//! within ±90 days (by the DUI age proxy) of their own interview.

use std::fmt;

use anyhow::Result;
use tracing::debug;

use cohort_model::RESPONDENT_ID;
use cohort_transform::data_utils::{column_f64_values, column_str_values, set_str_column};
use cohort_transform::inner_join_on;
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

/// Pubertal items in scoring order.
const ITEMS: [&str; 7] = [
    "FCPUHG00", "FCPUBH00", "FCPUSK00", "FCPUBR00", "FCPUMN00", "FCPUVC00", "FCPUFH00",
];
/// Item indexes contributing to the male score (growth spurt, body hair,
/// skin, voice, facial hair).
const BOY_ITEMS: [usize; 5] = [0, 1, 2, 5, 6];
/// The female score uses the first five items (through menarche).
const GIRL_ITEMS: [usize; 5] = [0, 1, 2, 3, 4];

const SEX: &str = "FCCSEX00";
const SEX_MALE: f64 = 1.0;
const SEX_FEMALE: f64 = 2.0;

/// Half-width of the same-sex reference window, in days of DUI.
const WINDOW_DAYS: f64 = 90.0;

/// Pubertal-development category relative to same-sex peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdCategory {
    Early,
    Ontime,
    Late,
    /// Boundary ties, missing scores, or reference windows too small for a
    /// defined standard deviation.
    Check,
}

impl PdCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Ontime => "ontime",
            Self::Late => "late",
            Self::Check => "check",
        }
    }
}

impl fmt::Display for PdCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Add the `PD` column: sex-specific row-wise mean of the pubertal items.
///
/// Respondents are partitioned by sex, each partition's item subset is
/// averaged with no partial means (any missing contributing item voids the
/// score), and the partitions are joined back on the respondent identifier.
/// Rows whose sex is outside {1, 2} drop out of the returned table, as in
/// the original analysis.
pub fn derive_pd_score(df: &DataFrame) -> Result<DataFrame> {
    let ids = column_str_values(df, RESPONDENT_ID)?;
    let sexes = column_f64_values(df, SEX)?;
    let mut items: Vec<Vec<Option<f64>>> = Vec::with_capacity(ITEMS.len());
    for item in ITEMS {
        items.push(column_f64_values(df, item)?);
    }

    let mut score_ids: Vec<String> = Vec::new();
    let mut scores: Vec<Option<f64>> = Vec::new();
    for (sex_code, subset) in [(SEX_MALE, &BOY_ITEMS), (SEX_FEMALE, &GIRL_ITEMS)] {
        for idx in 0..df.height() {
            if sexes[idx] != Some(sex_code) {
                continue;
            }
            let Some(id) = ids[idx].as_ref() else {
                continue;
            };
            let values: Vec<Option<f64>> =
                subset.iter().map(|item| items[*item][idx]).collect();
            let score = if values.iter().all(|v| v.is_some()) {
                let sum: f64 = values.iter().map(|v| v.unwrap_or_default()).sum();
                Some(sum / values.len() as f64)
            } else {
                None
            };
            score_ids.push(id.clone());
            scores.push(score);
        }
    }

    let pd_table = DataFrame::new(vec![
        Series::new(RESPONDENT_ID.into(), score_ids).into_column(),
        Series::new("PD".into(), scores).into_column(),
    ])?;
    let joined = inner_join_on(df, &pd_table, RESPONDENT_ID)?;
    debug!(
        rows = df.height(),
        scored = joined.height(),
        "pubertal scores derived"
    );
    Ok(joined)
}

/// Classify one score against its reference window's mean and sample std.
///
/// Any undefined input, and a score exactly on either boundary, falls into
/// `Check` rather than a definite category.
pub fn classify_pd(score: Option<f64>, mean: Option<f64>, std: Option<f64>) -> PdCategory {
    let (Some(score), Some(mean), Some(std)) = (score, mean, std) else {
        return PdCategory::Check;
    };
    let lower = mean - std;
    let upper = mean + std;
    if score > upper {
        PdCategory::Early
    } else if score < lower {
        PdCategory::Late
    } else if score > lower && score < upper {
        PdCategory::Ontime
    } else {
        PdCategory::Check
    }
}

/// Add the `PDCAT` column.
///
/// For each respondent the reference set is every same-sex respondent whose
/// DUI lies within ±90 days inclusive of their own (the respondent included).
/// The window statistics skip missing scores; windows that cannot produce a
/// sample standard deviation (fewer than two scored members) classify as
/// "check". Quadratic in the table height, which is fine at cohort scale.
pub fn derive_pd_category(df: &mut DataFrame) -> Result<()> {
    let sexes = column_f64_values(df, SEX)?;
    let duis = column_f64_values(df, "DUI")?;
    let scores = column_f64_values(df, "PD")?;

    let rows = df.height();
    let mut categories: Vec<Option<String>> = Vec::with_capacity(rows);
    for idx in 0..rows {
        let category = match (sexes[idx], duis[idx]) {
            (Some(sex), Some(dui)) => {
                let window: Vec<f64> = (0..rows)
                    .filter(|j| sexes[*j] == Some(sex))
                    .filter(|j| {
                        duis[*j].is_some_and(|d| {
                            d >= dui - WINDOW_DAYS && d <= dui + WINDOW_DAYS
                        })
                    })
                    .filter_map(|j| scores[j])
                    .collect();
                classify_pd(scores[idx], mean(&window), sample_std(&window))
            }
            _ => PdCategory::Check,
        };
        categories.push(Some(category.as_str().to_string()));
    }
    set_str_column(df, "PDCAT", categories)?;
    debug!(rows, "pubertal categories derived");
    Ok(())
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (ddof 1); undefined below two values.
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
