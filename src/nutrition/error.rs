//! Calculation error types

use thiserror::Error;

/// Errors that abort a single recalculation.
///
/// These signal a gap in the formula tables or a caller bug, never bad
/// patient data; out-of-range inputs are reported as validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("No BMR coefficient covers age {age}")]
    UncoveredAgeBand { age: u32 },

    #[error("Unknown weight usage: {0}")]
    UnknownWeightUsage(String),

    #[error("Unknown {field} selection: {value}")]
    UnknownSelection { field: &'static str, value: String },

    #[error("{field} must be positive")]
    NonPositiveInput { field: &'static str },
}

/// Result type for calculations
pub type CalcResult<T> = Result<T, CalcError>;
