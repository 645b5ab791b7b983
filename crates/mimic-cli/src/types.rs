use std::path::PathBuf;

use mimic_model::RowIssue;

#[derive(Debug)]
pub struct CohortResult {
    pub source: PathBuf,
    pub output: Option<PathBuf>,
    pub records: usize,
    pub fields: Vec<FieldSummary>,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct FieldSummary {
    pub field: String,
    pub records: usize,
    pub issues: Vec<RowIssue>,
}
