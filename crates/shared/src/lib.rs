//! Shared utilities for the Labbe backend.
//!
//! - Credential hashing with Argon2id
//! - Session token signing and resolution
//! - Random secrets (reset tokens, verification codes)
//! - Field validators usable from `validator` derives

pub mod crypto;
pub mod password;
pub mod session;
pub mod validation;
