//! Year-anchor resolution for de-identified event dates.
//!
//! Patients carry a randomized `anchor_year` plus an `anchor_year_group`
//! descriptor ("YYYY - YYYY") locating that anchor in real time. Shifting
//! an event date by the group's representative year re-anchors it into one
//! of the coarse calendar buckets in [`mimic_model::anchor`].

use chrono::{Datelike, NaiveDate};
use mimic_model::{NormalizeError, NormalizedColumn, RawValue, Result, bucket_for};
use tracing::debug;

use super::datetime::parse_event_date;

/// Parse an anchor-year group descriptor into its representative year:
/// the first integer of "YYYY - YYYY" plus one.
pub fn parse_anchor_year_group(group: &str) -> Result<i32> {
    let first = group.split('-').next().unwrap_or("").trim();
    let year: i32 = first.parse().map_err(|_| {
        NormalizeError::InvalidInput(format!("malformed anchor year group '{group}'"))
    })?;
    Ok(year + 1)
}

/// Resolve one event date into its anchor bucket label.
///
/// `delta = representative_year + (event year - anchor year)`; the bucket
/// containing `delta` names the result. A delta outside every bucket is an
/// explicit [`NormalizeError::OutOfRange`], never a stale or undefined
/// label.
pub fn resolve_anchor(
    anchor_year_group: &str,
    event_date: NaiveDate,
    anchor_year: i32,
) -> Result<String> {
    let representative = parse_anchor_year_group(anchor_year_group)?;
    let delta = representative + (event_date.year() - anchor_year);
    match bucket_for(delta) {
        Some(bucket) => Ok(bucket.label()),
        None => Err(NormalizeError::OutOfRange { delta }),
    }
}

/// Batch resolution over three parallel columns.
///
/// The three inputs must be the same length; a mismatch fails the whole
/// call with `InvalidInput`. Per-row problems (missing cells, unparseable
/// dates, out-of-range deltas) are collected as issues and leave the
/// remaining rows intact.
pub fn resolve_anchor_column(
    groups: &[RawValue],
    dates: &[RawValue],
    anchor_years: &[RawValue],
) -> Result<NormalizedColumn> {
    if groups.len() != dates.len() || groups.len() != anchor_years.len() {
        return Err(NormalizeError::InvalidInput(format!(
            "anchor inputs differ in length: {} groups, {} dates, {} anchor years",
            groups.len(),
            dates.len(),
            anchor_years.len()
        )));
    }

    let mut output = NormalizedColumn::with_capacity("anchor_year_group", groups.len());
    for ((group, date), anchor_year) in groups.iter().zip(dates).zip(anchor_years) {
        let row = resolve_anchor_row(group, date, anchor_year);
        match row {
            Ok(label) => output.push_label(label),
            Err(error) => {
                debug!(row = output.len(), %error, "anchor resolution failed");
                output.push_failure(error.to_string());
            }
        }
    }
    Ok(output)
}

fn resolve_anchor_row(group: &RawValue, date: &RawValue, anchor_year: &RawValue) -> Result<String> {
    let group = group
        .as_text()
        .ok_or_else(|| NormalizeError::InvalidInput("missing anchor year group".to_string()))?;
    let date = date
        .as_text()
        .and_then(parse_event_date)
        .ok_or_else(|| NormalizeError::InvalidInput("unparseable event date".to_string()))?;
    let anchor_year = cell_year(anchor_year)
        .ok_or_else(|| NormalizeError::InvalidInput("missing anchor year".to_string()))?;
    resolve_anchor(group, date, anchor_year)
}

// Anchor years arrive as integers from some extracts and text from others.
fn cell_year(value: &RawValue) -> Option<i32> {
    match value {
        RawValue::Number(number) => Some(*number as i32),
        RawValue::Text(text) => text.trim().parse().ok(),
        RawValue::Missing => None,
    }
}
