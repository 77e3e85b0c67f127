//! Days-until-interview derivation.
//!
//! The wave-6 derived file carries birth and interview dates as year+month
//! pairs. Both are anchored to day 15 and the difference in days becomes the
//! `DUI` age proxy used for cohort date matching.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use polars::prelude::DataFrame;

use crate::data_utils::{column_f64_values, set_f64_column};

const DOB_YEAR: &str = "FCCDBY00";
const DOB_MONTH: &str = "FCCDBM00";
const INTERVIEW_YEAR: &str = "FCINTY00";
const INTERVIEW_MONTH: &str = "FCINTM00";

/// Mid-month date from year/month code values.
fn mid_month(year: Option<f64>, month: Option<f64>) -> Option<NaiveDate> {
    let year = year?;
    let month = month?;
    NaiveDate::from_ymd_opt(year as i32, month as u32, 15)
}

/// Add the `DUI` column: days from date of birth to interview date.
///
/// Null when any of the four date components is missing or out of range.
pub fn derive_dui(df: &mut DataFrame) -> Result<()> {
    let dob_years = column_f64_values(df, DOB_YEAR)?;
    let dob_months = column_f64_values(df, DOB_MONTH)?;
    let int_years = column_f64_values(df, INTERVIEW_YEAR)?;
    let int_months = column_f64_values(df, INTERVIEW_MONTH)?;

    let mut dui: Vec<Option<f64>> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let dob = mid_month(dob_years[idx], dob_months[idx]);
        let interview = mid_month(int_years[idx], int_months[idx]);
        match (dob, interview) {
            (Some(dob), Some(interview)) => {
                dui.push(Some((interview - dob).num_days() as f64));
            }
            _ => dui.push(None),
        }
    }
    let populated = dui.iter().filter(|v| v.is_some()).count();
    set_f64_column(df, "DUI", dui)?;
    debug!(rows = df.height(), populated, "DUI derived");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn date_df(rows: Vec<(Option<f64>, Option<f64>, Option<f64>, Option<f64>)>) -> DataFrame {
        let (by, bm, iy, im): (Vec<_>, Vec<_>, Vec<_>, Vec<_>) = rows.into_iter().fold(
            (vec![], vec![], vec![], vec![]),
            |(mut by, mut bm, mut iy, mut im), (a, b, c, d)| {
                by.push(a);
                bm.push(b);
                iy.push(c);
                im.push(d);
                (by, bm, iy, im)
            },
        );
        DataFrame::new(vec![
            Series::new(DOB_YEAR.into(), by).into_column(),
            Series::new(DOB_MONTH.into(), bm).into_column(),
            Series::new(INTERVIEW_YEAR.into(), iy).into_column(),
            Series::new(INTERVIEW_MONTH.into(), im).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn one_year_apart_is_365_days() {
        let mut df = date_df(vec![(
            Some(2000.0),
            Some(3.0),
            Some(2001.0),
            Some(3.0),
        )]);
        derive_dui(&mut df).unwrap();
        let values = column_f64_values(&df, "DUI").unwrap();
        assert_eq!(values, vec![Some(365.0)]);
    }

    #[test]
    fn missing_component_yields_null() {
        let mut df = date_df(vec![(Some(2000.0), None, Some(2014.0), Some(6.0))]);
        derive_dui(&mut df).unwrap();
        let values = column_f64_values(&df, "DUI").unwrap();
        assert_eq!(values, vec![None]);
    }
}
