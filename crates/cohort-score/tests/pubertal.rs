use cohort_score::{derive_pd_category, derive_pd_score};
use cohort_transform::data_utils::{column_f64_values, column_str_values};
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

const ITEMS: [&str; 7] = [
    "FCPUHG00", "FCPUBH00", "FCPUSK00", "FCPUBR00", "FCPUMN00", "FCPUVC00", "FCPUFH00",
];

fn cohort(rows: &[(&str, f64, [Option<f64>; 7], Option<f64>)]) -> DataFrame {
    let ids: Vec<String> = rows.iter().map(|r| r.0.to_string()).collect();
    let sexes: Vec<Option<f64>> = rows.iter().map(|r| Some(r.1)).collect();
    let duis: Vec<Option<f64>> = rows.iter().map(|r| r.3).collect();
    let mut columns = vec![
        Series::new("ID".into(), ids).into_column(),
        Series::new("FCCSEX00".into(), sexes).into_column(),
        Series::new("DUI".into(), duis).into_column(),
    ];
    for (idx, item) in ITEMS.iter().enumerate() {
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.2[idx]).collect();
        columns.push(Series::new((*item).into(), values).into_column());
    }
    DataFrame::new(columns).unwrap()
}

#[test]
fn score_uses_the_sex_specific_item_subset() {
    // The boy is missing breast and menarche items, which his score ignores;
    // the girl is missing voice and facial hair, which hers ignores.
    let df = cohort(&[
        (
            "A_1",
            1.0,
            [Some(2.0), Some(3.0), Some(2.0), None, None, Some(1.0), Some(2.0)],
            Some(100.0),
        ),
        (
            "B_1",
            2.0,
            [Some(3.0), Some(3.0), Some(4.0), Some(2.0), Some(3.0), None, None],
            Some(100.0),
        ),
    ]);
    let scored = derive_pd_score(&df).unwrap();
    let ids = column_str_values(&scored, "ID").unwrap();
    let pds = column_f64_values(&scored, "PD").unwrap();
    let boy = ids.iter().position(|i| i.as_deref() == Some("A_1")).unwrap();
    let girl = ids.iter().position(|i| i.as_deref() == Some("B_1")).unwrap();
    assert!((pds[boy].unwrap() - 2.0).abs() < 1e-12);
    assert!((pds[girl].unwrap() - 3.0).abs() < 1e-12);
}

#[test]
fn missing_contributing_item_voids_the_score() {
    let df = cohort(&[(
        "A_1",
        1.0,
        [Some(2.0), None, Some(2.0), Some(1.0), Some(1.0), Some(1.0), Some(2.0)],
        Some(100.0),
    )]);
    let scored = derive_pd_score(&df).unwrap();
    let pds = column_f64_values(&scored, "PD").unwrap();
    assert_eq!(pds, vec![None]);
}

#[test]
fn respondents_with_unknown_sex_drop_out() {
    let df = cohort(&[
        ("A_1", 1.0, [Some(1.0); 7], Some(100.0)),
        ("C_1", 3.0, [Some(1.0); 7], Some(100.0)),
    ]);
    let scored = derive_pd_score(&df).unwrap();
    let ids = column_str_values(&scored, "ID").unwrap();
    assert_eq!(ids, vec![Some("A_1".to_string())]);
}

#[test]
fn category_compares_against_the_same_sex_window() {
    // Three girls share a window: mean 2, sample std 1. The middle score is
    // on time, the extremes sit exactly on the boundaries and are flagged.
    // A fourth girl 400 days away has a window of one, so no std.
    let df = cohort(&[
        ("A_1", 2.0, [Some(1.0); 7], Some(100.0)),
        ("B_1", 2.0, [Some(2.0); 7], Some(150.0)),
        ("C_1", 2.0, [Some(3.0); 7], Some(120.0)),
        ("D_1", 2.0, [Some(2.0); 7], Some(500.0)),
    ]);
    let mut scored = derive_pd_score(&df).unwrap();
    derive_pd_category(&mut scored).unwrap();
    let ids = column_str_values(&scored, "ID").unwrap();
    let cats = column_str_values(&scored, "PDCAT").unwrap();
    let cat_of = |id: &str| {
        let idx = ids.iter().position(|i| i.as_deref() == Some(id)).unwrap();
        cats[idx].clone().unwrap()
    };
    assert_eq!(cat_of("A_1"), "check");
    assert_eq!(cat_of("B_1"), "ontime");
    assert_eq!(cat_of("C_1"), "check");
    assert_eq!(cat_of("D_1"), "check");
}

#[test]
fn window_excludes_the_other_sex() {
    // The lone boy scores well above the girls but has no same-sex peers
    // inside his window, so his window is just himself.
    let df = cohort(&[
        ("A_1", 1.0, [Some(4.0); 7], Some(100.0)),
        ("B_1", 2.0, [Some(1.0); 7], Some(100.0)),
        ("C_1", 2.0, [Some(1.5); 7], Some(100.0)),
    ]);
    let mut scored = derive_pd_score(&df).unwrap();
    derive_pd_category(&mut scored).unwrap();
    let ids = column_str_values(&scored, "ID").unwrap();
    let cats = column_str_values(&scored, "PDCAT").unwrap();
    let idx = ids.iter().position(|i| i.as_deref() == Some("A_1")).unwrap();
    assert_eq!(cats[idx].as_deref(), Some("check"));
}
