//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`NotFound`] thrown when an entry id is not part of the entry set.
//! - [`InvariantViolation`] thrown when a mutation would break the minimum
//!   one-debit/one-credit rule.
//! - [`InvalidAmount`] thrown when an amount input is negative or not a number.
//!
//!  [`NotFound`]: EngineError::NotFound
//!  [`InvariantViolation`]: EngineError::InvariantViolation
//!  [`InvalidAmount`]: EngineError::InvalidAmount
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
