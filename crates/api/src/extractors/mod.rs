//! Custom Axum extractors.
//!
//! Extractors for the session account and for JSON bodies that report
//! failures in the standard error envelope.

pub mod account;
pub mod json;

pub use account::{CurrentAccount, OptionalAccount};
pub use json::{JsonBody, ValidatedJson};
