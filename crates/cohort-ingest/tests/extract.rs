//! Integration tests for extract loading.

use std::io::Write;

use cohort_ingest::{LoadOptions, ValueRecode, any_to_f64, load_extract};
use cohort_model::{MCS6_CM_INTERVIEW, SurveyFile, Wave};
use polars::prelude::AnyValue;

fn write_tab(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

fn column_values(df: &polars::prelude::DataFrame, name: &str) -> Vec<Option<f64>> {
    let series = df.column(name).unwrap();
    (0..df.height())
        .map(|idx| any_to_f64(series.get(idx).unwrap_or(AnyValue::Null)))
        .collect()
}

#[test]
fn sentinels_become_null() {
    let file = write_tab("MCSID\tAPCIPR00\tAPCICH00\nM001\t-9\t12\nM002\t20\t-1\nM003\t-8\t-8\n");
    let options = LoadOptions {
        sentinels: vec![-1.0, -8.0, -9.0],
        columns: vec!["APCIPR00".to_string(), "APCICH00".to_string()],
        recodes: Vec::new(),
    };
    let df = load_extract(file.path(), &options).unwrap();
    assert_eq!(column_values(&df, "APCIPR00"), vec![None, Some(20.0), None]);
    assert_eq!(column_values(&df, "APCICH00"), vec![Some(12.0), None, None]);
}

#[test]
fn wave_six_not_known_sentinel_and_menarche_recode() {
    let file = write_tab("MCSID\tFCPUMN00\nM001\t1\nM002\t2\nM003\t-2\n");
    let survey = SurveyFile {
        file_name: "mcs6_cm_interview.tab",
        wave: Wave::Six,
        id_prefix: "FC",
        extra_sentinels: &[-2.0],
        columns: &["FCPUMN00"],
    };
    let options = LoadOptions::for_file(&survey).with_recodes(vec![
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
    ]);
    let df = load_extract(file.path(), &options).unwrap();
    assert_eq!(
        column_values(&df, "FCPUMN00"),
        vec![Some(3.0), Some(0.0), None]
    );
}

#[test]
fn missing_selected_column_fails() {
    let file = write_tab("MCSID\tFCPUHG00\nM001\t1\n");
    let options = LoadOptions::for_file(&MCS6_CM_INTERVIEW);
    let err = load_extract(file.path(), &options).unwrap_err();
    assert!(err.to_string().contains("required column"));
}

#[test]
fn study_id_stays_textual() {
    let file = write_tab("MCSID\tAPCIPR00\nA0001\t5\n");
    let options = LoadOptions {
        sentinels: vec![-1.0],
        columns: vec!["APCIPR00".to_string()],
        recodes: Vec::new(),
    };
    let df = load_extract(file.path(), &options).unwrap();
    let id = df.column("MCSID").unwrap().get(0).unwrap();
    assert_eq!(cohort_ingest::any_to_string(id), "A0001");
}
