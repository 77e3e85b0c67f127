//! Survey processing pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Setup**: create the data/results directory tree
//! 2. **Load**: read the five tab-separated extracts into typed tables
//! 3. **Wave 1**: merge parent files, clean smoking items, derive scores,
//!    convert birth weight
//! 4. **Wave 6**: merge cohort-member files, derive DUI, pubertal score and
//!    category
//! 5. **Assemble**: cross-wave merge, family join, label recoding
//! 6. **Outputs**: report, figures, CSV export, run manifest
//!
//! Each stage takes the output of the previous stage and returns typed
//! results.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use cohort_ingest::{LoadOptions, ValueRecode, load_extract};
use cohort_model::{
    MCS1_PARENT_CM_INTERVIEW, MCS1_PARENT_INTERVIEW, MCS6_CM_DERIVED, MCS6_CM_INTERVIEW,
    MCS_LONGITUDINAL_FAMILY, SurveyFile, VarSet, catalogue,
};
use cohort_score::{clean_smoking_habit, derive_pd_category, derive_pd_score, derive_smoking_scores};
use cohort_transform::{
    add_category_columns, build_respondent_id, convert_birth_weight, derive_dui, drop_incomplete,
    join_family, merge_waves,
};

/// The five raw extracts, typed and keyed.
#[derive(Debug)]
pub struct LoadedTables {
    pub parent: DataFrame,
    pub parent_cm: DataFrame,
    pub cm_interview: DataFrame,
    pub cm_derived: DataFrame,
    pub family: DataFrame,
}

impl LoadedTables {
    pub fn row_total(&self) -> usize {
        self.parent.height()
            + self.parent_cm.height()
            + self.cm_interview.height()
            + self.cm_derived.height()
            + self.family.height()
    }
}

/// The menarche item is stored yes=1/no=2 in the raw extract; recode it onto
/// the 0-4 scale direction shared by the other pubertal items.
fn menarche_recodes() -> Vec<ValueRecode> {
    vec![
        ValueRecode {
            column: "FCPUMN00",
            from: 1.0,
            to: 3.0,
        },
        ValueRecode {
            column: "FCPUMN00",
            from: 2.0,
            to: 0.0,
        },
    ]
}

fn load_file(raw_dir: &Path, file: &SurveyFile, recodes: Vec<ValueRecode>) -> Result<DataFrame> {
    let path = raw_dir.join(file.file_name);
    let options = LoadOptions::for_file(file).with_recodes(recodes);
    let mut df = load_extract(&path, &options)
        .with_context(|| format!("load {}", path.display()))?;
    if file.person_number_column().is_some() {
        build_respondent_id(&mut df, file.id_prefix)
            .with_context(|| format!("build IDs for {}", file.file_name))?;
    }
    Ok(df)
}

/// Load every extract from `raw_dir` and attach respondent identifiers to
/// the person-level tables. The family file stays keyed by study ID alone.
pub fn load_tables(raw_dir: &Path) -> Result<LoadedTables> {
    let tables = LoadedTables {
        parent: load_file(raw_dir, &MCS1_PARENT_INTERVIEW, Vec::new())?,
        parent_cm: load_file(raw_dir, &MCS1_PARENT_CM_INTERVIEW, Vec::new())?,
        cm_interview: load_file(raw_dir, &MCS6_CM_INTERVIEW, menarche_recodes())?,
        cm_derived: load_file(raw_dir, &MCS6_CM_DERIVED, Vec::new())?,
        family: load_file(raw_dir, &MCS_LONGITUDINAL_FAMILY, Vec::new())?,
    };
    info!(rows = tables.row_total(), "extracts loaded");
    Ok(tables)
}

/// Build the wave-1 table: parent interview joined with the parent-about-CM
/// interview, smoking items cleaned and scored, birth weight converted to
/// kilograms.
pub fn build_wave1(parent: &DataFrame, parent_cm: &DataFrame) -> Result<DataFrame> {
    // The month-of-change replacement mean comes from the full parent
    // interview, before the join narrows the cohort.
    let mut parent = parent.clone();
    clean_smoking_habit(&mut parent).context("clean smoking habit")?;
    let mut wave1 =
        cohort_transform::inner_join_on(&parent, parent_cm, cohort_model::RESPONDENT_ID)
            .context("merge wave-1 files")?;
    derive_smoking_scores(&mut wave1).context("derive smoking scores")?;
    let converted = convert_birth_weight(&mut wave1).context("convert birth weight")?;
    debug!(rows = wave1.height(), converted, "wave-1 table built");
    Ok(wave1)
}

/// Build the wave-6 table: cohort-member interview joined with the derived
/// file, DUI and pubertal score/category attached.
pub fn build_wave6(cm_interview: &DataFrame, cm_derived: &DataFrame) -> Result<DataFrame> {
    let wave6 =
        cohort_transform::inner_join_on(cm_interview, cm_derived, cohort_model::RESPONDENT_ID)
            .context("merge wave-6 files")?;
    let mut wave6 = {
        let mut scored = derive_pd_score(&wave6).context("derive pubertal score")?;
        derive_dui(&mut scored).context("derive DUI")?;
        scored
    };
    derive_pd_category(&mut wave6).context("derive pubertal category")?;
    debug!(rows = wave6.height(), "wave-6 table built");
    Ok(wave6)
}

/// Cross-wave merge plus family join, with `_cat` label columns attached.
pub fn assemble(wave1: &DataFrame, wave6: &DataFrame, family: &DataFrame) -> Result<DataFrame> {
    let merged = merge_waves(wave1, wave6).context("merge waves")?;
    let mut merged = join_family(&merged, family).context("join family file")?;
    let recoded = add_category_columns(&mut merged).context("recode nominal variables")?;
    info!(rows = merged.height(), recoded, "analysis table assembled");
    Ok(merged)
}

/// Drop rows missing any analysis variable. The survivors are what the CSV
/// export and any external modelling script see.
pub fn clean_analysis(df: &DataFrame) -> Result<DataFrame> {
    let required: Vec<&str> = catalogue(VarSet::Regression)
        .iter()
        .map(|var| var.code)
        .collect();
    let cleaned = drop_incomplete(df, &required).context("drop incomplete analysis rows")?;
    info!(
        rows = cleaned.height(),
        dropped = df.height().saturating_sub(cleaned.height()),
        "analysis rows cleaned"
    );
    Ok(cleaned)
}
