//! Record-level transformations on survey tables.
//!
//! Everything between loading and scoring: nominal recoding to label columns,
//! respondent-identifier construction, days-until-interview derivation,
//! birth-weight unit conversion, wave merging, and analysis-row cleaning.

pub mod data_utils;

mod clean;
mod dui;
mod ids;
mod merge;
mod recode;
mod units;

pub use clean::drop_incomplete;
pub use dui::derive_dui;
pub use ids::{build_respondent_id, make_id};
pub use merge::{inner_join_on, join_family, merge_waves};
pub use recode::add_category_columns;
pub use units::{OUNCE_TO_KG, convert_birth_weight, lboz_to_kg};
