//! Per-row issue reporting for batch normalization output.

use serde::{Deserialize, Serialize};

/// A problem confined to a single input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowIssue {
    /// Zero-based row index in the input batch.
    pub row: usize,
    /// Human-readable description of the problem.
    pub message: String,
}

/// One derived label column plus the issues collected while producing it.
///
/// `values` is row-aligned with the input batch; `None` marks a row whose
/// derivation failed, with the reason recorded in `issues`. A batch call
/// never aborts on a single bad row — only structurally invalid input
/// (mismatched parallel column lengths) fails a call as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizedColumn {
    pub field: String,
    pub values: Vec<Option<String>>,
    pub issues: Vec<RowIssue>,
}

impl NormalizedColumn {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            values: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn with_capacity(field: impl Into<String>, capacity: usize) -> Self {
        Self {
            field: field.into(),
            values: Vec::with_capacity(capacity),
            issues: Vec::new(),
        }
    }

    /// Record a successfully derived label for the next row.
    pub fn push_label(&mut self, label: impl Into<String>) {
        self.values.push(Some(label.into()));
    }

    /// Record a failed row: no label, one issue.
    pub fn push_failure(&mut self, message: impl Into<String>) {
        let row = self.values.len();
        self.values.push(None);
        self.issues.push(RowIssue {
            row,
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
