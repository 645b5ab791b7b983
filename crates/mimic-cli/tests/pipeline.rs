//! Integration tests for the pipeline module.

use std::fs;
use std::path::PathBuf;

use mimic_cli::pipeline::{NormalizeConfig, ingest, normalize, output};
use mimic_model::NormalizedColumn;

const COHORT_CSV: &str = "\
subject_id,gender,race,admission_location,language,insurance,first_careunit,intime,admittime,anchor_year_group,anchor_year,weight,height\n\
1,MALE,WHITE,EMERGENCY ROOM,ENGLISH,Medicare,Medical Intensive Care Unit (MICU),2150-03-01 04:30:00,2150-03-01 02:00:00,2014 - 2016,2150,70,175\n\
2,Female,ASIAN - CHINESE,WALK-IN,?,Private,Trauma SICU (TSICU),2150-06-02 13:00:00,2150-06-02 11:00:00,2017 - 2019,2150,55,160\n";

fn fixture(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("cohort.csv");
    fs::write(&path, contents).expect("write fixture");
    (dir, path)
}

fn find<'a>(derived: &'a [NormalizedColumn], field: &str) -> &'a NormalizedColumn {
    derived
        .iter()
        .find(|column| column.field == field)
        .unwrap_or_else(|| panic!("field {field} should be derived"))
}

fn labels(column: &NormalizedColumn) -> Vec<&str> {
    column
        .values
        .iter()
        .map(|value| value.as_deref().unwrap_or(""))
        .collect()
}

#[test]
fn normalizes_full_cohort_extract() {
    let (_dir, path) = fixture(COHORT_CSV);
    let table = ingest(&path).unwrap();
    let derived = normalize(&table, &NormalizeConfig::default()).unwrap();

    // six categorical fields plus time-of-day, anchor, and BMI
    assert_eq!(derived.len(), 9);

    assert_eq!(labels(find(&derived, "gender")), vec!["M", "F"]);
    assert_eq!(labels(find(&derived, "race")), vec!["White", "Asian"]);
    assert_eq!(
        labels(find(&derived, "admission_location")),
        vec!["Emergency Room", "Other"]
    );
    assert_eq!(labels(find(&derived, "language")), vec!["English", "Other"]);
    assert_eq!(
        labels(find(&derived, "insurance")),
        vec!["Medicare", "Other"]
    );
    assert_eq!(
        labels(find(&derived, "care_unit")),
        vec!["Medical-Surgical", "Neuro-Trauma"]
    );
    assert_eq!(labels(find(&derived, "time_of_day")), vec!["00-06", "12-18"]);
    assert_eq!(
        labels(find(&derived, "anchor_year_group")),
        vec!["2014 - 2017", "2017 - 2020"]
    );
    assert_eq!(labels(find(&derived, "bmi")), vec!["Normal", "Normal"]);

    for column in &derived {
        assert!(column.is_clean(), "{} should be clean", column.field);
        assert_eq!(column.len(), table.height());
    }
}

#[test]
fn output_appends_label_columns() {
    let (dir, path) = fixture(COHORT_CSV);
    let table = ingest(&path).unwrap();
    let derived = normalize(&table, &NormalizeConfig::default()).unwrap();

    let out_path = dir.path().join("output").join("cohort_normalized.csv");
    output(&table, &derived, &out_path).unwrap();

    let written = fs::read_to_string(&out_path).unwrap();
    let mut lines = written.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("subject_id,gender,race"));
    assert!(header.contains("race_label"));
    assert!(header.contains("anchor_year_group_label"));
    assert!(header.contains("bmi_label"));

    let first = lines.next().unwrap();
    assert!(first.contains("White"));
    assert!(first.contains("2014 - 2017"));
}

#[test]
fn absent_columns_are_skipped() {
    let (_dir, path) = fixture("subject_id,gender\n1,MALE\n2,unknown\n");
    let table = ingest(&path).unwrap();
    let derived = normalize(&table, &NormalizeConfig::default()).unwrap();

    assert_eq!(derived.len(), 1);
    assert_eq!(labels(&derived[0]), vec!["M", "Other"]);
}

#[test]
fn failed_rows_write_empty_label_cells() {
    let (dir, path) = fixture("subject_id,intime\n1,bogus\n2,2150-01-01 09:00:00\n");
    let table = ingest(&path).unwrap();
    let derived = normalize(&table, &NormalizeConfig::default()).unwrap();

    let column = find(&derived, "time_of_day");
    assert_eq!(column.issue_count(), 1);

    let out_path = dir.path().join("labeled.csv");
    output(&table, &derived, &out_path).unwrap();
    let written = fs::read_to_string(&out_path).unwrap();
    let rows: Vec<&str> = written.lines().collect();
    assert!(rows[1].ends_with(','), "failed row gets an empty label cell");
    assert!(rows[2].ends_with("06-12"));
}

#[test]
fn impute_height_uses_cohort_mean() {
    let csv = "subject_id,race,weight,height\n1,WHITE,70,160\n2,WHITE,70,\n";
    let (_dir, path) = fixture(csv);
    let table = ingest(&path).unwrap();

    let without = normalize(&table, &NormalizeConfig::default()).unwrap();
    assert_eq!(
        labels(find(&without, "bmi")),
        vec!["Overweight", "Unknown or Unavailable"]
    );

    let config = NormalizeConfig {
        impute_height: true,
    };
    let with = normalize(&table, &config).unwrap();
    // cohort mean height is 160 cm, so the missing row classifies too
    assert_eq!(labels(find(&with, "bmi")), vec!["Overweight", "Overweight"]);
}
