//! BMI computation and ethnicity-conditional weight classification.
//!
//! Thresholds follow Weir & Jan, "BMI classification percentile and cut off
//! points" (2019); Asian populations use the lower WHO cut-offs for the
//! overweight and obesity boundaries.

use mimic_model::{
    BmiOptions, MissingHeightPolicy, NormalizeError, NormalizedColumn, RawValue, Result,
};
use tracing::debug;

/// Label for rows whose BMI cannot be computed.
pub const UNKNOWN_OR_UNAVAILABLE: &str = "Unknown or Unavailable";

/// Categories the classifier can produce, fallback last.
pub const BMI_CATEGORIES: [&str; 6] = [
    "Severely Underweight",
    "Underweight",
    "Normal",
    "Overweight",
    "Obesity",
    UNKNOWN_OR_UNAVAILABLE,
];

/// BMI = weight(kg) / (height(cm)/100)^2.
///
/// Height must be positive before division; a non-positive height is the
/// missing-height error condition, never a silent divide.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Result<f64> {
    if height_cm <= 0.0 {
        return Err(NormalizeError::MissingHeight);
    }
    let meters = height_cm / 100.0;
    Ok(weight_kg / (meters * meters))
}

/// Map a BMI value to its clinical category.
///
/// Boundary placement: exactly 18.5 takes the ethnicity-conditional branch,
/// not "Underweight".
pub fn categorize_bmi(bmi: f64, ethnicity: &str) -> String {
    if bmi < 16.5 {
        return "Severely Underweight".to_string();
    }
    if bmi < 18.5 {
        return "Underweight".to_string();
    }
    let asian = ethnicity.to_lowercase().contains("asian");
    let label = if asian {
        if bmi < 23.0 {
            "Normal"
        } else if bmi < 25.0 {
            "Overweight"
        } else {
            "Obesity"
        }
    } else if bmi < 25.0 {
        "Normal"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obesity"
    };
    label.to_string()
}

/// Classify one row of weight/height/ethnicity.
///
/// A missing or non-positive height is imputed from the externally computed
/// population mean when enabled; otherwise the configured policy decides
/// between the fallback label and [`NormalizeError::MissingHeight`]. A
/// missing weight always yields the fallback label.
pub fn classify_bmi(
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    ethnicity: &str,
    options: &BmiOptions,
) -> Result<String> {
    let Some(height) = effective_height(height_cm, options) else {
        return match options.missing_height {
            MissingHeightPolicy::FallbackLabel => Ok(UNKNOWN_OR_UNAVAILABLE.to_string()),
            MissingHeightPolicy::Error => Err(NormalizeError::MissingHeight),
        };
    };
    let Some(weight) = weight_kg else {
        return Ok(UNKNOWN_OR_UNAVAILABLE.to_string());
    };
    let bmi = compute_bmi(weight, height)?;
    Ok(categorize_bmi(bmi, ethnicity))
}

/// Batch classification over parallel weight/height/ethnicity columns.
///
/// Inputs must share a length; a mismatch fails the call with
/// `InvalidInput`. Per-row failures (policy `Error`) are collected as
/// issues without aborting the batch.
pub fn classify_bmi_column(
    weights: &[Option<f64>],
    heights: &[Option<f64>],
    ethnicities: &[RawValue],
    options: &BmiOptions,
) -> Result<NormalizedColumn> {
    if weights.len() != heights.len() || weights.len() != ethnicities.len() {
        return Err(NormalizeError::InvalidInput(format!(
            "bmi inputs differ in length: {} weights, {} heights, {} ethnicities",
            weights.len(),
            heights.len(),
            ethnicities.len()
        )));
    }

    let mut output = NormalizedColumn::with_capacity("bmi", weights.len());
    for ((weight, height), ethnicity) in weights.iter().zip(heights).zip(ethnicities) {
        let ethnicity = ethnicity.as_text().unwrap_or("");
        match classify_bmi(*weight, *height, ethnicity, options) {
            Ok(label) => output.push_label(label),
            Err(error) => {
                debug!(row = output.len(), %error, "bmi classification failed");
                output.push_failure(error.to_string());
            }
        }
    }
    Ok(output)
}

/// Mean of the present, positive heights. Callers enabling imputation
/// compute this once over the cohort and pass it via [`BmiOptions`].
pub fn population_mean_height(heights: &[Option<f64>]) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for height in heights.iter().flatten() {
        if *height > 0.0 {
            sum += height;
            count += 1;
        }
    }
    if count == 0 { None } else { Some(sum / count as f64) }
}

fn effective_height(height_cm: Option<f64>, options: &BmiOptions) -> Option<f64> {
    match height_cm {
        Some(height) if height > 0.0 => Some(height),
        _ if options.impute_missing_height => options
            .population_mean_height_cm
            .filter(|mean| *mean > 0.0),
        _ => None,
    }
}
