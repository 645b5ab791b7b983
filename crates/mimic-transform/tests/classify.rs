//! Tests for the pattern classifier.

use mimic_model::{CaseMode, NormalizeError, RawValue, RuleTable};
use mimic_transform::{classify_column, classify_strict, classify_value};
use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

fn race_table() -> RuleTable {
    RuleTable::new("race", "Unknown")
        .rule("White", &["WHITE", "PORTUGUESE"])
        .rule("Hispanic", &["HISPANIC"])
        .rule("Asian", &["ASIAN"])
        .rule("Black", &["BLACK"])
        .rule("Other", &["OTHER", "SOUTH AMERICAN"])
}

fn text_batch(values: &[&str]) -> Vec<RawValue> {
    values.iter().copied().map(RawValue::from).collect()
}

#[test]
fn unmatched_values_take_default() {
    let output = classify_column(&text_batch(&["MARTIAN", "UNOBTAINIUM"]), &race_table());
    assert_eq!(
        output.values,
        vec![Some("Unknown".to_string()), Some("Unknown".to_string())]
    );
    assert!(output.is_clean());
}

#[test]
fn earlier_rule_wins_when_both_match() {
    let output = classify_column(&text_batch(&["WHITE - OTHER EUROPEAN"]), &race_table());
    assert_eq!(output.values, vec![Some("White".to_string())]);
}

#[test]
fn missing_values_take_default() {
    let output = classify_column(&[RawValue::Missing], &race_table());
    assert_eq!(output.values, vec![Some("Unknown".to_string())]);
    assert!(output.is_clean());
}

#[test]
fn empty_batch_yields_empty_output() {
    let output = classify_column(&[], &race_table());
    assert!(output.is_empty());
    assert!(output.is_clean());
}

#[test]
fn numeric_value_is_a_row_issue_in_batch_mode() {
    let values = vec![
        RawValue::from("ASIAN - CHINESE"),
        RawValue::from(42.0),
        RawValue::from("BLACK/AFRICAN"),
    ];
    let output = classify_column(&values, &race_table());
    assert_eq!(output.len(), 3);
    assert_eq!(output.values[0], Some("Asian".to_string()));
    assert_eq!(output.values[1], None);
    assert_eq!(output.values[2], Some("Black".to_string()));
    assert_eq!(output.issue_count(), 1);
    assert_eq!(output.issues[0].row, 1);
}

#[test]
fn numeric_value_fails_strict_mode() {
    let values = vec![RawValue::from("WHITE"), RawValue::from(42.0)];
    let result = classify_strict(&values, &race_table());
    assert!(matches!(result, Err(NormalizeError::InvalidInput(_))));
}

#[test]
fn strict_mode_returns_all_labels_when_clean() {
    let labels = classify_strict(&text_batch(&["WHITE", "HISPANIC/LATINO"]), &race_table())
        .expect("clean batch");
    assert_eq!(labels, vec!["White".to_string(), "Hispanic".to_string()]);
}

#[test]
fn case_sensitivity_is_per_table() {
    let sensitive = RuleTable::new("gender", "Other")
        .with_case(CaseMode::Sensitive)
        .rule("M", &["M"])
        .rule("F", &["F"]);
    assert_eq!(
        classify_value(&RawValue::from("marc"), &sensitive).unwrap(),
        "Other"
    );
    assert_eq!(
        classify_value(&RawValue::from("MALE"), &sensitive).unwrap(),
        "M"
    );
}

#[test]
fn classify_is_idempotent_under_identity_rules() {
    let first = classify_column(
        &text_batch(&["WHITE", "HISPANIC/LATINO", "MARTIAN"]),
        &race_table(),
    );

    // Identity table: each canonical label maps to itself.
    let identity = RuleTable::new("race", "Unknown")
        .rule("White", &["White"])
        .rule("Hispanic", &["Hispanic"])
        .rule("Asian", &["Asian"])
        .rule("Black", &["Black"])
        .rule("Other", &["Other"]);
    let relabel: Vec<RawValue> = first
        .values
        .iter()
        .map(|value| match value {
            Some(label) => RawValue::from(label.clone()),
            None => RawValue::Missing,
        })
        .collect();
    let second = classify_column(&relabel, &identity);
    assert_eq!(second.values, first.values);
}

proptest! {
    #[test]
    fn output_length_always_matches_input(raw in proptest::collection::vec(".*", 0..40)) {
        let values: Vec<RawValue> = raw.iter().map(|cell| RawValue::from_cell(cell)).collect();
        let table = race_table();
        let output = classify_column(&values, &table);
        prop_assert_eq!(output.len(), values.len());
    }

    #[test]
    fn output_labels_stay_in_closed_set(raw in proptest::collection::vec(".*", 0..40)) {
        let table = race_table();
        let values: Vec<RawValue> = raw.iter().map(|cell| RawValue::from_cell(cell)).collect();
        let output = classify_column(&values, &table);
        let allowed = table.labels();
        for label in output.values.iter().flatten() {
            prop_assert!(allowed.contains(&label.as_str()));
        }
    }
}
