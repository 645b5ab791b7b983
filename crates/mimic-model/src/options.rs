//! Configuration options for the BMI classifier.

use serde::{Deserialize, Serialize};

/// Behavior when a row's height is missing and imputation is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingHeightPolicy {
    /// Assign the "Unknown or Unavailable" label. Default, matching the
    /// batch/reporting contract of the pipeline.
    #[default]
    FallbackLabel,
    /// Raise `NormalizeError::MissingHeight` for programmatic callers.
    Error,
}

/// Options controlling BMI classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BmiOptions {
    /// Substitute the population mean height for missing heights.
    pub impute_missing_height: bool,

    /// Population mean height in cm. Computed externally over the cohort
    /// and passed in — the classifier never derives population statistics.
    pub population_mean_height_cm: Option<f64>,

    /// Missing-height handling when imputation is off or no mean is given.
    pub missing_height: MissingHeightPolicy,
}

impl BmiOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable mean-height imputation with the externally computed mean.
    #[must_use]
    pub fn with_imputation(mut self, mean_height_cm: f64) -> Self {
        self.impute_missing_height = true;
        self.population_mean_height_cm = Some(mean_height_cm);
        self
    }

    #[must_use]
    pub fn with_missing_height_policy(mut self, policy: MissingHeightPolicy) -> Self {
        self.missing_height = policy;
        self
    }
}
