//! Random secrets and one-way digests.

use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};

/// Lower and upper bounds of a verification code (inclusive).
pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// A freshly generated password-reset secret.
///
/// Only `hashed` is ever stored; `plaintext` goes into the reset link.
#[derive(Debug, Clone)]
pub struct ResetToken {
    pub plaintext: String,
    pub hashed: String,
}

/// Generates 32 random bytes, hex-encoded, together with their digest.
pub fn generate_reset_token() -> ResetToken {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let plaintext = hex::encode(bytes);
    let hashed = sha256_hex(&plaintext);
    ResetToken { plaintext, hashed }
}

/// Generates a uniformly random six-digit verification code.
pub fn generate_otp_code() -> String {
    rand::thread_rng()
        .gen_range(OTP_MIN..=OTP_MAX)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_value() {
        assert_eq!(
            sha256_hex("test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_reset_token_shape() {
        let token = generate_reset_token();
        assert_eq!(token.plaintext.len(), 64);
        assert!(token.plaintext.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(token.hashed, sha256_hex(&token.plaintext));
        assert_ne!(token.hashed, token.plaintext);
    }

    #[test]
    fn test_reset_tokens_are_unique() {
        assert_ne!(generate_reset_token().plaintext, generate_reset_token().plaintext);
    }

    #[test]
    fn test_otp_code_is_six_digits_in_range() {
        for _ in 0..500 {
            let code = generate_otp_code();
            assert_eq!(code.len(), 6);
            let value: u32 = code.parse().unwrap();
            assert!((OTP_MIN..=OTP_MAX).contains(&value));
        }
    }
}
