//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`UnknownCategory`] thrown when a value is not part of the category
//!   catalog. Aggregations never drop such records silently.
//! - [`InvalidAmount`] thrown when an amount is negative or malformed.
//! - [`AmountOverflow`] thrown when a sum of amounts leaves the `i64` range.
//! - [`InvalidDate`] thrown when a date is not a valid `YYYY-MM-DD` calendar date.
//!
//!  [`UnknownCategory`]: EngineError::UnknownCategory
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`AmountOverflow`]: EngineError::AmountOverflow
//!  [`InvalidDate`]: EngineError::InvalidDate
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount total does not fit in 64-bit cents")]
    AmountOverflow,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    #[error("Dataset error: {0}")]
    Dataset(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UnknownCategory(a), Self::UnknownCategory(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::AmountOverflow, Self::AmountOverflow) => true,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidTimezone(a), Self::InvalidTimezone(b)) => a == b,
            (Self::InvalidCatalog(a), Self::InvalidCatalog(b)) => a == b,
            (Self::InvalidExpense(a), Self::InvalidExpense(b)) => a == b,
            (Self::InvalidFilter(a), Self::InvalidFilter(b)) => a == b,
            (Self::Dataset(a), Self::Dataset(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
