//! error kinds shared by the whole crate

use thiserror::Error;

/// All algorithmic entry points return this error type.
/// Operations are deterministic pure computations, so an error is never
/// transient and there is no retry path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// malformed or inconsistent input : dimension mismatch, empty dataset, out of range ratio or k
    #[error("invalid input : {0}")]
    InvalidInput(String),
    /// a precision/recall/f1 denominator is zero. The caller decides whether to treat it as 0, NaN or skip
    #[error("metric undefined for class {class} : {reason}")]
    UndefinedMetric { class: String, reason: String },
}
