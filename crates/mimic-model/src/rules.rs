//! Ordered rule tables for categorical field classification.
//!
//! A [`RuleTable`] is the classification policy for one source field: an
//! ordered list of (label, predicate) pairs plus the field's default label.
//! Order is priority — when several predicates match a value, the earliest
//! rule in the table wins. The output label set is closed: only rule labels
//! and the default can ever be assigned.

use serde::{Deserialize, Serialize};

/// Case handling for substring matching.
///
/// Most clinical text fields (race, care unit) match ignoring case; gender
/// detection is case-sensitive because the source data distinguishes the
/// uppercase "M"/"F" markers from incidental lowercase letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaseMode {
    /// Match substrings ignoring ASCII case.
    #[default]
    Insensitive,
    /// Match substrings exactly as written.
    Sensitive,
}

/// Predicate over raw text: true when the value contains any accepted
/// substring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPredicate {
    needles: Vec<String>,
    case: CaseMode,
}

impl MatchPredicate {
    pub fn new(needles: &[&str], case: CaseMode) -> Self {
        let needles = needles
            .iter()
            .map(|needle| match case {
                CaseMode::Insensitive => needle.to_uppercase(),
                CaseMode::Sensitive => (*needle).to_string(),
            })
            .collect();
        Self { needles, case }
    }

    /// True when `value` contains any accepted substring.
    pub fn matches(&self, value: &str) -> bool {
        match self.case {
            CaseMode::Insensitive => {
                let upper = value.to_uppercase();
                self.needles.iter().any(|needle| upper.contains(needle))
            }
            CaseMode::Sensitive => self.needles.iter().any(|needle| value.contains(needle)),
        }
    }
}

/// One classification rule: the label assigned when the predicate matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub label: String,
    pub predicate: MatchPredicate,
}

/// Ordered classification policy for a single source field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    field: String,
    default_label: String,
    case: CaseMode,
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Create an empty table with the field's default label.
    /// Matching is case-insensitive unless [`with_case`](Self::with_case) says otherwise.
    pub fn new(field: impl Into<String>, default_label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            default_label: default_label.into(),
            case: CaseMode::default(),
            rules: Vec::new(),
        }
    }

    /// Set the case mode applied to rules added after this call.
    #[must_use]
    pub fn with_case(mut self, case: CaseMode) -> Self {
        self.case = case;
        self
    }

    /// Append a rule. Table order defines priority among overlapping matches.
    #[must_use]
    pub fn rule(mut self, label: &str, needles: &[&str]) -> Self {
        self.rules.push(Rule {
            label: label.to_string(),
            predicate: MatchPredicate::new(needles, self.case),
        });
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The closed set of labels this table can produce, default last.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::with_capacity(self.rules.len() + 1);
        for rule in &self.rules {
            if !labels.contains(&rule.label.as_str()) {
                labels.push(&rule.label);
            }
        }
        if !labels.contains(&self.default_label.as_str()) {
            labels.push(&self.default_label);
        }
        labels
    }

    /// The label of the first rule matching `value`, if any.
    pub fn first_match(&self, value: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(value))
            .map(|rule| rule.label.as_str())
    }
}
