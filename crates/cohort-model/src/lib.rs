//! Data model for the cohort survey pipeline.
//!
//! This crate holds the static variable catalogue (codes, display labels,
//! scale types), the value-to-label maps for nominal variables, and the
//! descriptors of the raw survey extracts. Everything here is declarative
//! configuration loaded once into immutable lookup structures; no I/O.

mod catalogue;
mod files;
mod labels;
mod lookup;

pub use catalogue::{VarDef, VarKind, VarSet, VariableCatalogue, catalogue};
pub use files::{
    COMMON_SENTINELS, MCS1_PARENT_CM_INTERVIEW, MCS1_PARENT_INTERVIEW, MCS6_CM_DERIVED,
    MCS6_CM_INTERVIEW, MCS_LONGITUDINAL_FAMILY, SurveyFile, Wave, survey_files,
};
pub use labels::{CategoryLabels, category_labels};
pub use lookup::CaseInsensitiveSet;

/// Column name of the base study identifier (first column of every extract).
pub const STUDY_ID: &str = "MCSID";

/// Column name of the derived per-respondent identifier.
pub const RESPONDENT_ID: &str = "ID";

/// Suffix appended to a nominal variable's code for its recoded label column.
pub const CAT_SUFFIX: &str = "_cat";
