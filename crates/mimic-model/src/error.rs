use thiserror::Error;

/// Errors raised by the normalization engines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// Malformed batch shape or value type.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Anchor delta fell outside every defined year bucket.
    #[error("no anchor bucket contains delta year {delta}")]
    OutOfRange { delta: i32 },
    /// Height missing or non-positive with imputation unavailable.
    #[error("missing height for BMI computation")]
    MissingHeight,
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
