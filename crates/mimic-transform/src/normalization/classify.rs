//! Pattern classification over batches of raw categorical values.
//!
//! Rules are evaluated in table order per value; the first matching rule
//! wins and later matches are ignored. This replaces the array-wide
//! conditional-overwrite approach of vectorized pipelines with explicit
//! ordered evaluation per item, so priority semantics stay visible.

use mimic_model::{NormalizeError, NormalizedColumn, RawValue, Result, RuleTable};
use tracing::debug;

/// Classify a single raw value against an ordered rule table.
///
/// Missing values never match a predicate and take the field's default
/// label. Numeric values are a type error for a text classification.
pub fn classify_value(value: &RawValue, table: &RuleTable) -> Result<String> {
    match value {
        RawValue::Missing => Ok(table.default_label().to_string()),
        RawValue::Text(text) => Ok(table
            .first_match(text)
            .unwrap_or(table.default_label())
            .to_string()),
        RawValue::Number(number) => Err(NormalizeError::InvalidInput(format!(
            "numeric value {number} in text field '{}'",
            table.field()
        ))),
    }
}

/// Classify a batch, collecting per-row issues instead of aborting.
///
/// Output length equals input length and ordering is element-for-element.
/// Rows that fail the type check yield no label and gain an issue entry;
/// unmatched values resolve to the default label and never error.
pub fn classify_column(values: &[RawValue], table: &RuleTable) -> NormalizedColumn {
    let mut output = NormalizedColumn::with_capacity(table.field(), values.len());
    for value in values {
        match classify_value(value, table) {
            Ok(label) => output.push_label(label),
            Err(error) => {
                debug!(field = table.field(), row = output.len(), %error, "row rejected");
                output.push_failure(error.to_string());
            }
        }
    }
    output
}

/// Fail-fast variant for programmatic callers: the first malformed value
/// fails the whole batch.
pub fn classify_strict(values: &[RawValue], table: &RuleTable) -> Result<Vec<String>> {
    values
        .iter()
        .map(|value| classify_value(value, table))
        .collect()
}
