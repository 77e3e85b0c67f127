//! Static variable catalogue.
//!
//! Variable codes, display names, and scale types for every variable the
//! pipeline touches, grouped into the sets the original analysis works with.
//! The catalogue drives recoding (which variables get a `_cat` label column),
//! reporting (scale vs nominal summaries), and analysis-row cleaning.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Measurement level of a catalogued variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarKind {
    /// Continuous or count-like; summarized with min/max/median/mean.
    Scale,
    /// Categorical; recoded to text labels and summarized with value counts.
    Nominal,
    /// Identifier; never summarized.
    Id,
}

/// One catalogued variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarDef {
    /// Survey variable code (column name in the extracts), e.g. `APCIPR00`.
    pub code: &'static str,
    /// Human-readable display name used in reports and figure titles.
    pub name: &'static str,
    pub kind: VarKind,
}

impl VarDef {
    const fn new(code: &'static str, name: &'static str, kind: VarKind) -> Self {
        Self { code, name, kind }
    }
}

/// Named variable groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarSet {
    /// Smoking-habit items plus the derived CHANGE/SCORE_* fields.
    Smoking,
    /// Raw pubertal development items (wave 6).
    Pubertal,
    /// Derived pubertal fields (DUI, PD, PDCAT).
    PubertalScores,
    /// Identifier and sex.
    Demographic,
    /// Variables required complete in the exported analysis table.
    Regression,
    /// Union of Smoking, Pubertal, PubertalScores, and Demographic.
    All,
}

const SMOKING: &[VarDef] = &[
    VarDef::new("APSMMA00", "How many cigarettes per day", VarKind::Scale),
    VarDef::new("APPIOF00", "Frequency of pipe smoking", VarKind::Nominal),
    VarDef::new("APSMTY00", "Smoked in last 2 years", VarKind::Nominal),
    VarDef::new(
        "APSMEV00",
        "Ever regularly smoked tobacco products",
        VarKind::Nominal,
    ),
    VarDef::new(
        "APCIPR00",
        "Number of cigarettes smoked per day before preg",
        VarKind::Scale,
    ),
    VarDef::new(
        "APSMCH00",
        "Changed number smoked during pregnancy",
        VarKind::Nominal,
    ),
    VarDef::new("APWHCH00", "When changed smoking habits", VarKind::Nominal),
    VarDef::new(
        "APCICH00",
        "Number smoked per day after change",
        VarKind::Scale,
    ),
    VarDef::new(
        "APSMKR00",
        "Whether anyone smokes in the same room as CM",
        VarKind::Nominal,
    ),
    VarDef::new(
        "CHANGE",
        "Change of n smoked per day before and after",
        VarKind::Scale,
    ),
    VarDef::new(
        "SCORE_1",
        "Smoking score during first trimester",
        VarKind::Scale,
    ),
    VarDef::new(
        "SCORE_2",
        "Smoking score during second trimester",
        VarKind::Scale,
    ),
    VarDef::new(
        "SCORE_3",
        "Smoking score during third trimester",
        VarKind::Scale,
    ),
    VarDef::new("SCORE_T", "Smoking score during preg", VarKind::Scale),
];

/// Raw pubertal items in scoring order. Boys use indices {0, 1, 2, 5, 6},
/// girls the first five; see `cohort-score`.
const PUBERTAL: &[VarDef] = &[
    VarDef::new("FCPUHG00", "CM growth spurt", VarKind::Nominal),
    VarDef::new("FCPUBH00", "CM no body hair", VarKind::Nominal),
    VarDef::new("FCPUSK00", "CM skin changes eg spots", VarKind::Nominal),
    VarDef::new("FCPUBR00", "CM breast growth", VarKind::Nominal),
    VarDef::new("FCPUMN00", "CM started to menstruate", VarKind::Nominal),
    VarDef::new("FCPUVC00", "CM voice change", VarKind::Nominal),
    VarDef::new("FCPUFH00", "CM facial hair", VarKind::Nominal),
];

const PUBERTAL_SCORES: &[VarDef] = &[
    VarDef::new("DUI", "Days until interview", VarKind::Scale),
    VarDef::new("PD", "Pubertal development score", VarKind::Scale),
    VarDef::new("PDCAT", "Pubertal development category", VarKind::Nominal),
];

const DEMOGRAPHIC: &[VarDef] = &[
    VarDef::new("MCSID", "MCS ID", VarKind::Id),
    VarDef::new("FCCSEX00", "CM Sex", VarKind::Nominal),
];

const REGRESSION: &[VarDef] = &[
    VarDef::new("PDCAT", "Pubertal development category", VarKind::Nominal),
    VarDef::new("PTTYPE2", "Stratum within Country", VarKind::Nominal),
    VarDef::new(
        "FOVWT2",
        "S6: Overall Weight (inc NR adjustment) whole",
        VarKind::Scale,
    ),
    VarDef::new(
        "SCORE_1",
        "Smoking score during first trimester",
        VarKind::Scale,
    ),
    VarDef::new("SCORE_T", "Smoking score during preg", VarKind::Scale),
    VarDef::new(
        "AOECDSC0",
        "DV OECD Income Weighted Quintiles (Single Country Analysis)",
        VarKind::Nominal,
    ),
    VarDef::new("APWTKG00", "Birth weight kilos and grams", VarKind::Scale),
    VarDef::new("ADDAGB00", "Respondent age at birth of CM", VarKind::Scale),
    VarDef::new("ADBMIPRE", "BMI of respondent before CM born", VarKind::Scale),
];

/// Return the variable definitions of the requested set, in catalogue order.
pub fn catalogue(set: VarSet) -> Vec<VarDef> {
    match set {
        VarSet::Smoking => SMOKING.to_vec(),
        VarSet::Pubertal => PUBERTAL.to_vec(),
        VarSet::PubertalScores => PUBERTAL_SCORES.to_vec(),
        VarSet::Demographic => DEMOGRAPHIC.to_vec(),
        VarSet::Regression => REGRESSION.to_vec(),
        VarSet::All => {
            let mut all = SMOKING.to_vec();
            all.extend_from_slice(PUBERTAL);
            all.extend_from_slice(PUBERTAL_SCORES);
            all.extend_from_slice(DEMOGRAPHIC);
            all
        }
    }
}

/// Immutable code-keyed lookup over a variable set.
#[derive(Debug, Clone)]
pub struct VariableCatalogue {
    vars: Vec<VarDef>,
    by_code: BTreeMap<&'static str, usize>,
}

impl VariableCatalogue {
    pub fn new(set: VarSet) -> Self {
        let vars = catalogue(set);
        let by_code = vars
            .iter()
            .enumerate()
            .map(|(idx, var)| (var.code, idx))
            .collect();
        Self { vars, by_code }
    }

    pub fn get(&self, code: &str) -> Option<&VarDef> {
        self.by_code.get(code).map(|idx| &self.vars[*idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &VarDef> {
        self.vars.iter()
    }

    /// Variables of the given kind, in catalogue order.
    pub fn of_kind(&self, kind: VarKind) -> Vec<&VarDef> {
        self.vars.iter().filter(|var| var.kind == kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_set_concatenates_groups() {
        let all = catalogue(VarSet::All);
        let expected =
            SMOKING.len() + PUBERTAL.len() + PUBERTAL_SCORES.len() + DEMOGRAPHIC.len();
        assert_eq!(all.len(), expected);
        assert_eq!(all[0].code, "APSMMA00");
        assert_eq!(all.last().unwrap().code, "FCCSEX00");
    }

    #[test]
    fn catalogue_lookup_by_code() {
        let lookup = VariableCatalogue::new(VarSet::All);
        assert_eq!(lookup.get("PD").unwrap().name, "Pubertal development score");
        assert!(lookup.get("NOPE").is_none());
    }

    #[test]
    fn regression_set_names_all_required_variables() {
        let codes: Vec<&str> = catalogue(VarSet::Regression)
            .iter()
            .map(|var| var.code)
            .collect();
        assert_eq!(
            codes,
            vec![
                "PDCAT", "PTTYPE2", "FOVWT2", "SCORE_1", "SCORE_T", "AOECDSC0", "APWTKG00",
                "ADDAGB00", "ADBMIPRE"
            ]
        );
    }
}
