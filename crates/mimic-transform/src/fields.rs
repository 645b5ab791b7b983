//! Per-field parsers for MIMIC cohort columns.
//!
//! Thin adapters pairing each source field with its rule table or
//! derived-value engine. Categorical groupings follow Yarnell et al. 2023
//! (Am J Respir Crit Care Med 207(3):271-82).

use chrono::Timelike;
use mimic_model::{BmiOptions, CaseMode, NormalizedColumn, RawValue, Result, RuleTable};

use crate::normalization::anchor::resolve_anchor_column;
use crate::normalization::bmi::classify_bmi_column;
use crate::normalization::classify::classify_column;
use crate::normalization::datetime::parse_event_datetime;

/// Categorical source fields classified by substring rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalField {
    AdmissionLocation,
    Gender,
    Race,
    Language,
    Insurance,
    CareUnit,
}

impl CategoricalField {
    pub const ALL: [Self; 6] = [
        Self::AdmissionLocation,
        Self::Gender,
        Self::Race,
        Self::Language,
        Self::Insurance,
        Self::CareUnit,
    ];

    /// Field name used for derived columns and reporting.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AdmissionLocation => "admission_location",
            Self::Gender => "gender",
            Self::Race => "race",
            Self::Language => "language",
            Self::Insurance => "insurance",
            Self::CareUnit => "care_unit",
        }
    }

    /// Column carrying this field in hosp/icu extracts.
    pub fn source_column(&self) -> &'static str {
        match self {
            Self::CareUnit => "first_careunit",
            _ => self.name(),
        }
    }

    /// The field's classification policy.
    pub fn rules(&self) -> RuleTable {
        match self {
            Self::AdmissionLocation => admission_location_rules(),
            Self::Gender => gender_rules(),
            Self::Race => race_rules(),
            Self::Language => language_rules(),
            Self::Insurance => insurance_rules(),
            Self::CareUnit => care_unit_rules(),
        }
    }
}

/// Admission sources kept distinct for cohort analysis; everything else
/// folds into "Other".
pub fn admission_location_rules() -> RuleTable {
    RuleTable::new("admission_location", "Other")
        .rule("Emergency Room", &["EMERGENCY ROOM"])
        .rule("Physician Referral", &["PHYSICIAN REFERRAL"])
        .rule("Transfer From Hospital", &["TRANSFER FROM HOSPITAL"])
}

/// Case-sensitive: the uppercase markers distinguish "MALE"/"Female" from
/// incidental lowercase letters.
pub fn gender_rules() -> RuleTable {
    RuleTable::new("gender", "Other")
        .with_case(CaseMode::Sensitive)
        .rule("M", &["M"])
        .rule("F", &["F"])
}

/// Self-identified race-ethnicity groups. "White" precedes "Other" so a
/// value matching both (e.g. "WHITE - OTHER EUROPEAN") keeps the earlier
/// label.
pub fn race_rules() -> RuleTable {
    RuleTable::new("race", "Unknown")
        .rule("White", &["WHITE", "PORTUGUESE"])
        .rule("Hispanic", &["HISPANIC"])
        .rule("Asian", &["ASIAN"])
        .rule("Black", &["BLACK"])
        .rule(
            "Other",
            &[
                "OTHER",
                "SOUTH AMERICAN",
                "CARIBBEAN ISLAND",
                "NATIVE HAWAIIAN OR OTHER PACIFIC ISLANDER",
                "AMERICAN INDIAN/ALASKA NATIVE",
            ],
        )
}

pub fn language_rules() -> RuleTable {
    RuleTable::new("language", "Other").rule("English", &["ENGLISH"])
}

pub fn insurance_rules() -> RuleTable {
    RuleTable::new("insurance", "Other")
        .rule("Medicaid", &["Medicaid"])
        .rule("Medicare", &["Medicare"])
        .rule("Other", &["Other"])
}

/// ICU care unit groups. Neuro-Trauma is listed first: "Neuro Surgical
/// Intensive Care Unit" contains the Medical-Surgical pattern "Surgical
/// Intensive Care Unit", and table order is the tie-break.
pub fn care_unit_rules() -> RuleTable {
    RuleTable::new("care_unit", "Other")
        .rule(
            "Neuro-Trauma",
            &[
                "Neuro Intermediate",
                "Neuro Stepdown",
                "Neuro Surgical Intensive Care Unit",
                "Trauma SICU",
            ],
        )
        .rule(
            "Cardiac",
            &["Cardiac Vascular Intensive Care Unit", "Coronary Care Unit"],
        )
        .rule(
            "Medical-Surgical",
            &[
                "Medical Intensive Care Unit",
                "Medical/Surgical Intensive Care Unit",
                "Surgical Intensive Care Unit",
            ],
        )
}

/// Classify a batch for one categorical field.
pub fn parse_categorical(field: CategoricalField, values: &[RawValue]) -> NormalizedColumn {
    classify_column(values, &field.rules())
}

pub fn parse_admission_location(values: &[RawValue]) -> NormalizedColumn {
    parse_categorical(CategoricalField::AdmissionLocation, values)
}

pub fn parse_gender(values: &[RawValue]) -> NormalizedColumn {
    parse_categorical(CategoricalField::Gender, values)
}

pub fn parse_race(values: &[RawValue]) -> NormalizedColumn {
    parse_categorical(CategoricalField::Race, values)
}

pub fn parse_language(values: &[RawValue]) -> NormalizedColumn {
    parse_categorical(CategoricalField::Language, values)
}

pub fn parse_insurance(values: &[RawValue]) -> NormalizedColumn {
    parse_categorical(CategoricalField::Insurance, values)
}

pub fn parse_care_unit(values: &[RawValue]) -> NormalizedColumn {
    parse_categorical(CategoricalField::CareUnit, values)
}

/// Hour-of-day buckets, half-open on the hour.
pub const TIME_OF_DAY_LABELS: [&str; 4] = ["00-06", "06-12", "12-18", "18-24"];

fn hour_label(hour: u32) -> &'static str {
    match hour {
        0..6 => "00-06",
        6..12 => "06-12",
        12..18 => "12-18",
        _ => "18-24",
    }
}

/// Bucket intervention timestamps by hour of day.
///
/// Missing timestamps take the field default "Unknown"; unparseable text
/// is a per-row issue.
pub fn parse_time_of_day(values: &[RawValue]) -> NormalizedColumn {
    let mut output = NormalizedColumn::with_capacity("time_of_day", values.len());
    for value in values {
        match value {
            RawValue::Missing => output.push_label("Unknown"),
            RawValue::Text(text) => match parse_event_datetime(text) {
                Some(timestamp) => output.push_label(hour_label(timestamp.hour())),
                None => output.push_failure(format!("unparseable timestamp '{text}'")),
            },
            RawValue::Number(number) => {
                output.push_failure(format!("numeric value {number} in timestamp field"));
            }
        }
    }
    output
}

/// Re-anchor event dates using the patient anchor columns.
pub fn parse_anchor_year(
    groups: &[RawValue],
    dates: &[RawValue],
    anchor_years: &[RawValue],
) -> Result<NormalizedColumn> {
    resolve_anchor_column(groups, dates, anchor_years)
}

/// Classify BMI from weight/height/ethnicity columns.
pub fn parse_bmi(
    weights: &[Option<f64>],
    heights: &[Option<f64>],
    ethnicities: &[RawValue],
    options: &BmiOptions,
) -> Result<NormalizedColumn> {
    classify_bmi_column(weights, heights, ethnicities, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_buckets_are_half_open() {
        assert_eq!(hour_label(0), "00-06");
        assert_eq!(hour_label(5), "00-06");
        assert_eq!(hour_label(6), "06-12");
        assert_eq!(hour_label(12), "12-18");
        assert_eq!(hour_label(18), "18-24");
        assert_eq!(hour_label(23), "18-24");
    }

    #[test]
    fn neuro_unit_outranks_surgical_pattern() {
        let table = care_unit_rules();
        assert_eq!(
            table.first_match("Neuro Surgical Intensive Care Unit"),
            Some("Neuro-Trauma")
        );
        assert_eq!(
            table.first_match("Surgical Intensive Care Unit"),
            Some("Medical-Surgical")
        );
    }
}
