//! Domain layer for the Labbe event backend.
//!
//! This crate contains:
//! - Domain models (accounts, events, guests, OTP records, onboarding profiles)
//! - Pure business logic services
//! - Domain error types

pub mod errors;
pub mod models;
pub mod services;
