//! Smoking-exposure score.
//!
//! The wave-1 parent interview records cigarettes per day before pregnancy
//! (`APCIPR00`), whether the habit changed (`APSMCH00`: 1 yes, 2 no,
//! 3 can't remember), the month of change (`APWHCH00`), and the count after
//! the change (`APCICH00`). The score estimates exposure per trimester by
//! weighting the before/after counts across the month of change.

use anyhow::Result;
use tracing::debug;

use polars::prelude::DataFrame;

use cohort_transform::data_utils::{column_f64_values, set_f64_column};

const CHANGE_FLAG: &str = "APSMCH00";
const BEFORE_COUNT: &str = "APCIPR00";
const AFTER_COUNT: &str = "APCICH00";
const CHANGE_MONTH: &str = "APWHCH00";

const FLAG_CHANGED: f64 = 1.0;
const FLAG_UNCHANGED: f64 = 2.0;

/// "Less than one per day" in the after-count item.
const CODE_LESS_THAN_ONE: f64 = 96.0;
/// "Can't remember" in the after-count item.
const CODE_CANT_REMEMBER_COUNT: f64 = 97.0;
/// "Can't remember" in the month-of-change item.
const CODE_CANT_REMEMBER_MONTH: f64 = 10.0;

const SCORE_COLUMNS: [&str; 4] = ["SCORE_1", "SCORE_2", "SCORE_3", "SCORE_T"];
const TRIMESTERS: [(f64, f64); 3] = [(0.0, 3.0), (3.0, 6.0), (6.0, 9.0)];

/// Clean the smoking-habit items ahead of scoring.
///
/// - respondents who did not change keep the before-pregnancy count as the
///   after-change count;
/// - after-count 96 ("less than one per day") coerces to 1, 97 ("can't
///   remember") to null;
/// - month-of-change 10 ("can't remember") is replaced cohort-wide by the
///   rounded mean of the column as loaded (the 10 codes themselves
///   contribute to that mean, as in the original analysis);
/// - `CHANGE` = after − before is added.
pub fn clean_smoking_habit(df: &mut DataFrame) -> Result<()> {
    let flags = column_f64_values(df, CHANGE_FLAG)?;
    let before = column_f64_values(df, BEFORE_COUNT)?;
    let mut after = column_f64_values(df, AFTER_COUNT)?;
    let mut months = column_f64_values(df, CHANGE_MONTH)?;

    for idx in 0..df.height() {
        if flags[idx] == Some(FLAG_UNCHANGED) {
            after[idx] = before[idx];
        }
    }
    for value in &mut after {
        *value = match *value {
            Some(v) if v == CODE_LESS_THAN_ONE => Some(1.0),
            Some(v) if v == CODE_CANT_REMEMBER_COUNT => None,
            other => other,
        };
    }

    let known: Vec<f64> = months.iter().filter_map(|v| *v).collect();
    if !known.is_empty() {
        let average = (known.iter().sum::<f64>() / known.len() as f64).round();
        for value in &mut months {
            if *value == Some(CODE_CANT_REMEMBER_MONTH) {
                *value = Some(average);
            }
        }
    }

    let change: Vec<Option<f64>> = after
        .iter()
        .zip(before.iter())
        .map(|(after, before)| match (after, before) {
            (Some(after), Some(before)) => Some(after - before),
            _ => None,
        })
        .collect();

    set_f64_column(df, AFTER_COUNT, after)?;
    set_f64_column(df, CHANGE_MONTH, months)?;
    set_f64_column(df, "CHANGE", change)?;
    debug!(rows = df.height(), "smoking habit items cleaned");
    Ok(())
}

/// One trimester's exposure estimate.
///
/// The month of change is clamped into `[bot, top]`; the weighted mix of the
/// before and after counts over the three-month window is averaged per month.
pub fn trimester_subscore(before: f64, after: f64, month: f64, bot: f64, top: f64) -> f64 {
    let month = month.clamp(bot, top);
    (before * (month - bot) + after * (top - month)) / 3.0
}

/// Derive `SCORE_1..SCORE_3` and `SCORE_T`.
///
/// All four fields start at 0. Respondents who did not change score the
/// after-change count in every field; respondents who changed score the
/// trimester-weighted estimates with the total as their mean. Respondents
/// answering "can't remember" (flag 3), and rows with a missing flag, keep
/// the zero fill in all four fields.
pub fn derive_smoking_scores(df: &mut DataFrame) -> Result<()> {
    let flags = column_f64_values(df, CHANGE_FLAG)?;
    let before = column_f64_values(df, BEFORE_COUNT)?;
    let after = column_f64_values(df, AFTER_COUNT)?;
    let months = column_f64_values(df, CHANGE_MONTH)?;

    let rows = df.height();
    let mut scores: [Vec<Option<f64>>; 4] = [
        vec![Some(0.0); rows],
        vec![Some(0.0); rows],
        vec![Some(0.0); rows],
        vec![Some(0.0); rows],
    ];

    for idx in 0..rows {
        match flags[idx] {
            Some(flag) if flag == FLAG_UNCHANGED => {
                for column in &mut scores {
                    column[idx] = after[idx];
                }
            }
            Some(flag) if flag == FLAG_CHANGED => {
                let mut subs: [Option<f64>; 3] = [None; 3];
                for (i, (bot, top)) in TRIMESTERS.iter().enumerate() {
                    subs[i] = match (before[idx], after[idx], months[idx]) {
                        (Some(b), Some(a), Some(m)) => {
                            Some(trimester_subscore(b, a, m, *bot, *top))
                        }
                        _ => None,
                    };
                    scores[i][idx] = subs[i];
                }
                scores[3][idx] = match (subs[0], subs[1], subs[2]) {
                    (Some(s1), Some(s2), Some(s3)) => Some((s1 + s2 + s3) / 3.0),
                    _ => None,
                };
            }
            // Flag 3 ("can't remember") and missing flags keep the zero fill.
            _ => {}
        }
    }

    for (name, values) in SCORE_COLUMNS.iter().zip(scores.into_iter()) {
        set_f64_column(df, name, values)?;
    }
    debug!(rows, "smoking scores derived");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn smoking_df(
        flags: Vec<Option<f64>>,
        before: Vec<Option<f64>>,
        after: Vec<Option<f64>>,
        months: Vec<Option<f64>>,
    ) -> DataFrame {
        DataFrame::new(vec![
            Series::new(CHANGE_FLAG.into(), flags).into_column(),
            Series::new(BEFORE_COUNT.into(), before).into_column(),
            Series::new(AFTER_COUNT.into(), after).into_column(),
            Series::new(CHANGE_MONTH.into(), months).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn unchanged_rows_copy_before_to_after_and_score_it() {
        let mut df = smoking_df(
            vec![Some(2.0)],
            vec![Some(15.0)],
            vec![None],
            vec![None],
        );
        clean_smoking_habit(&mut df).unwrap();
        derive_smoking_scores(&mut df).unwrap();
        for name in SCORE_COLUMNS {
            assert_eq!(
                column_f64_values(&df, name).unwrap(),
                vec![Some(15.0)],
                "{name}"
            );
        }
    }

    #[test]
    fn less_than_one_coerces_to_one_and_cant_remember_to_null() {
        let mut df = smoking_df(
            vec![Some(1.0), Some(1.0)],
            vec![Some(10.0), Some(10.0)],
            vec![Some(96.0), Some(97.0)],
            vec![Some(4.0), Some(4.0)],
        );
        clean_smoking_habit(&mut df).unwrap();
        let after = column_f64_values(&df, AFTER_COUNT).unwrap();
        assert_eq!(after, vec![Some(1.0), None]);
        let change = column_f64_values(&df, "CHANGE").unwrap();
        assert_eq!(change, vec![Some(-9.0), None]);
    }

    #[test]
    fn cant_remember_month_takes_the_rounded_cohort_mean() {
        // Months 2, 4, and 10: the mean (16/3 = 5.33) includes the 10 code
        // and rounds to 5.
        let mut df = smoking_df(
            vec![Some(1.0); 3],
            vec![Some(10.0); 3],
            vec![Some(4.0); 3],
            vec![Some(2.0), Some(4.0), Some(10.0)],
        );
        clean_smoking_habit(&mut df).unwrap();
        let months = column_f64_values(&df, CHANGE_MONTH).unwrap();
        assert_eq!(months, vec![Some(2.0), Some(4.0), Some(5.0)]);
    }

    #[test]
    fn changed_row_matches_worked_example() {
        // before=10, after=4, month=5: sub-scores 10, 8, 4; total 7.333.
        let mut df = smoking_df(
            vec![Some(1.0)],
            vec![Some(10.0)],
            vec![Some(4.0)],
            vec![Some(5.0)],
        );
        clean_smoking_habit(&mut df).unwrap();
        derive_smoking_scores(&mut df).unwrap();
        let s1 = column_f64_values(&df, "SCORE_1").unwrap()[0].unwrap();
        let s2 = column_f64_values(&df, "SCORE_2").unwrap()[0].unwrap();
        let s3 = column_f64_values(&df, "SCORE_3").unwrap()[0].unwrap();
        let total = column_f64_values(&df, "SCORE_T").unwrap()[0].unwrap();
        assert_eq!(s1, 10.0);
        assert_eq!(s2, 8.0);
        assert_eq!(s3, 4.0);
        assert!((total - 22.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn cant_remember_flag_keeps_zero_scores() {
        let mut df = smoking_df(
            vec![Some(3.0), None],
            vec![Some(10.0), Some(10.0)],
            vec![Some(4.0), Some(4.0)],
            vec![Some(5.0), Some(5.0)],
        );
        clean_smoking_habit(&mut df).unwrap();
        derive_smoking_scores(&mut df).unwrap();
        for name in SCORE_COLUMNS {
            assert_eq!(
                column_f64_values(&df, name).unwrap(),
                vec![Some(0.0), Some(0.0)],
                "{name}"
            );
        }
    }

    #[test]
    fn changed_total_is_mean_of_subscores() {
        let mut df = smoking_df(
            vec![Some(1.0)],
            vec![Some(20.0)],
            vec![Some(5.0)],
            vec![Some(7.0)],
        );
        clean_smoking_habit(&mut df).unwrap();
        derive_smoking_scores(&mut df).unwrap();
        let s1 = column_f64_values(&df, "SCORE_1").unwrap()[0].unwrap();
        let s2 = column_f64_values(&df, "SCORE_2").unwrap()[0].unwrap();
        let s3 = column_f64_values(&df, "SCORE_3").unwrap()[0].unwrap();
        let total = column_f64_values(&df, "SCORE_T").unwrap()[0].unwrap();
        assert!((total - (s1 + s2 + s3) / 3.0).abs() < 1e-12);
    }
}
