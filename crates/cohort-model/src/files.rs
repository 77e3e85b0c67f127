//! Descriptors of the raw survey extracts.
//!
//! One descriptor per tab-separated file under `data/raw`: which wave it
//! belongs to, the field-name prefix used for its person-number column, the
//! sentinel codes beyond the common set, and the columns the pipeline reads.

use serde::{Deserialize, Serialize};

/// Survey wave a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wave {
    /// Wave 1, prenatal parent interviews.
    One,
    /// Wave 6, age-14 cohort-member follow-up.
    Six,
    /// Longitudinal family-level file, keyed by study ID only.
    Longitudinal,
}

/// Sentinel codes shared by every extract: not applicable, don't know,
/// refusal.
pub const COMMON_SENTINELS: &[f64] = &[-1.0, -8.0, -9.0];

/// One raw extract file.
#[derive(Debug, Clone)]
pub struct SurveyFile {
    /// File name under `data/raw`.
    pub file_name: &'static str,
    pub wave: Wave,
    /// Prefix of the person-number column (`<prefix>NUM00`); empty for
    /// family-level files, which carry no person number.
    pub id_prefix: &'static str,
    /// Sentinel codes in addition to [`COMMON_SENTINELS`].
    pub extra_sentinels: &'static [f64],
    /// Columns read from the file, beyond the leading study-ID column.
    pub columns: &'static [&'static str],
}

impl SurveyFile {
    /// Name of this file's person-number column, if it has one.
    pub fn person_number_column(&self) -> Option<String> {
        if self.id_prefix.is_empty() {
            None
        } else {
            Some(format!("{}NUM00", self.id_prefix))
        }
    }

    /// All sentinel codes for this file.
    pub fn sentinels(&self) -> Vec<f64> {
        let mut codes = COMMON_SENTINELS.to_vec();
        codes.extend_from_slice(self.extra_sentinels);
        codes
    }
}

/// Wave-1 parent interview: smoking items and respondent deriveds.
pub const MCS1_PARENT_INTERVIEW: SurveyFile = SurveyFile {
    file_name: "mcs1_parent_interview.tab",
    wave: Wave::One,
    id_prefix: "AP",
    extra_sentinels: &[],
    columns: &[
        "APNUM00", "APSMMA00", "APPIOF00", "APSMTY00", "APSMEV00", "APCIPR00", "APSMCH00",
        "APWHCH00", "APCICH00", "APSMKR00", "ADDAGB00", "ADBMIPRE", "AOECDSC0",
    ],
};

/// Wave-1 parent-about-cohort-member interview: birth weight fields.
pub const MCS1_PARENT_CM_INTERVIEW: SurveyFile = SurveyFile {
    file_name: "mcs1_parent_cm_interview.tab",
    wave: Wave::One,
    id_prefix: "AP",
    extra_sentinels: &[],
    columns: &["APNUM00", "APWTLB00", "APWTOU00", "APWTKG00"],
};

/// Wave-6 cohort-member interview: pubertal items and sex.
pub const MCS6_CM_INTERVIEW: SurveyFile = SurveyFile {
    file_name: "mcs6_cm_interview.tab",
    wave: Wave::Six,
    id_prefix: "FC",
    extra_sentinels: &[-2.0],
    columns: &[
        "FCNUM00", "FCCSEX00", "FCPUHG00", "FCPUBH00", "FCPUSK00", "FCPUBR00", "FCPUMN00",
        "FCPUVC00", "FCPUFH00",
    ],
};

/// Wave-6 derived file: birth and interview year/month for DUI.
pub const MCS6_CM_DERIVED: SurveyFile = SurveyFile {
    file_name: "mcs6_cm_derived.tab",
    wave: Wave::Six,
    id_prefix: "FC",
    extra_sentinels: &[-2.0],
    columns: &["FCNUM00", "FCCDBY00", "FCCDBM00", "FCINTY00", "FCINTM00"],
};

/// Longitudinal family file: sampling stratum and survey weight.
pub const MCS_LONGITUDINAL_FAMILY: SurveyFile = SurveyFile {
    file_name: "mcs_longitudinal_family_file.tab",
    wave: Wave::Longitudinal,
    id_prefix: "",
    extra_sentinels: &[],
    columns: &["PTTYPE2", "FOVWT2"],
};

/// All extracts the pipeline loads, in load order.
pub fn survey_files() -> Vec<SurveyFile> {
    vec![
        MCS1_PARENT_INTERVIEW,
        MCS1_PARENT_CM_INTERVIEW,
        MCS6_CM_INTERVIEW,
        MCS6_CM_DERIVED,
        MCS_LONGITUDINAL_FAMILY,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_number_column_uses_prefix() {
        assert_eq!(
            MCS1_PARENT_INTERVIEW.person_number_column().as_deref(),
            Some("APNUM00")
        );
        assert_eq!(
            MCS6_CM_INTERVIEW.person_number_column().as_deref(),
            Some("FCNUM00")
        );
        assert_eq!(MCS_LONGITUDINAL_FAMILY.person_number_column(), None);
    }

    #[test]
    fn wave_six_files_add_not_known_sentinel() {
        assert!(MCS6_CM_DERIVED.sentinels().contains(&-2.0));
        assert!(!MCS1_PARENT_INTERVIEW.sentinels().contains(&-2.0));
    }
}
