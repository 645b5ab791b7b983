//! Cohort field normalization engines.
//!
//! This crate provides the decision logic for cohort field normalization:
//!
//! - **normalization::classify**: ordered first-match-wins pattern classification
//! - **normalization::anchor**: de-identified date re-anchoring into 3-year buckets
//! - **normalization::bmi**: BMI computation and ethnicity-conditional categories
//! - **normalization::datetime**: event timestamp parsing
//! - **fields**: per-field rule tables and wrapper parsers

pub mod fields;
pub mod normalization;

// Re-export the core entry points for external use
pub use normalization::anchor::{parse_anchor_year_group, resolve_anchor, resolve_anchor_column};
pub use normalization::bmi::{
    classify_bmi, classify_bmi_column, compute_bmi, population_mean_height,
};
pub use normalization::classify::{classify_column, classify_strict, classify_value};
