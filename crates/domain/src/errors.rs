//! Domain error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid {field} value: {value}")]
    InvalidValue { field: &'static str, value: String },
}
