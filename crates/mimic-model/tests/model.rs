//! Tests for the cohort normalization data model.

use mimic_model::{BmiOptions, CaseMode, MissingHeightPolicy, RawValue, RuleTable, bucket_for};

fn race_table() -> RuleTable {
    RuleTable::new("race", "Unknown")
        .rule("White", &["WHITE", "PORTUGUESE"])
        .rule("Hispanic", &["HISPANIC"])
        .rule("Asian", &["ASIAN"])
        .rule("Black", &["BLACK"])
}

#[test]
fn rule_table_first_match_priority() {
    let table = race_table();
    assert_eq!(table.first_match("WHITE - EASTERN EUROPEAN"), Some("White"));
    assert_eq!(table.first_match("PORTUGUESE"), Some("White"));
    assert_eq!(table.first_match("HISPANIC/LATINO - CUBAN"), Some("Hispanic"));
    assert_eq!(table.first_match("MARTIAN"), None);
}

#[test]
fn rule_table_reports_closed_label_set() {
    let table = race_table();
    let labels = table.labels();
    assert_eq!(labels, vec!["White", "Hispanic", "Asian", "Black", "Unknown"]);
}

#[test]
fn case_mode_applies_to_rules_added_after() {
    let table = RuleTable::new("gender", "Other")
        .with_case(CaseMode::Sensitive)
        .rule("M", &["M"]);
    assert_eq!(table.first_match("MALE"), Some("M"));
    assert_eq!(table.first_match("male"), None);
}

#[test]
fn raw_value_from_cell_treats_blank_as_missing() {
    assert!(RawValue::from_cell("   ").is_missing());
    assert_eq!(
        RawValue::from_cell(" WHITE "),
        RawValue::Text("WHITE".to_string())
    );
}

#[test]
fn anchor_buckets_are_contiguous() {
    assert_eq!(bucket_for(2010).unwrap().label(), "2008 - 2011");
    assert_eq!(bucket_for(2011).unwrap().label(), "2011 - 2014");
    assert!(bucket_for(2030).is_none());
}

#[test]
fn bmi_options_builder() {
    let options = BmiOptions::new()
        .with_imputation(170.0)
        .with_missing_height_policy(MissingHeightPolicy::Error);
    assert!(options.impute_missing_height);
    assert_eq!(options.population_mean_height_cm, Some(170.0));
    assert_eq!(options.missing_height, MissingHeightPolicy::Error);
}
