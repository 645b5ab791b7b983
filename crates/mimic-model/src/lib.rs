pub mod anchor;
pub mod error;
pub mod options;
pub mod report;
pub mod rules;
pub mod value;

pub use anchor::{ANCHOR_BUCKETS, AnchorBucket, bucket_for};
pub use error::{NormalizeError, Result};
pub use options::{BmiOptions, MissingHeightPolicy};
pub use report::{NormalizedColumn, RowIssue};
pub use rules::{CaseMode, MatchPredicate, Rule, RuleTable};
pub use value::RawValue;
