//! Session tokens.
//!
//! Tokens are HS256 JWTs carrying only the account id plus issue and expiry
//! times. Resolution reports a single opaque failure so callers cannot tell a
//! bad signature from an expired or malformed token.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionTokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Invalid token")]
    Invalid,
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Signing keys and lifetime for session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in_secs: i64,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("expires_in_secs", &self.expires_in_secs)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl SessionKeys {
    pub fn new(secret: &str, expires_in_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in_secs,
        }
    }

    /// Signs a token for `account_id` issued now.
    pub fn issue(&self, account_id: Uuid) -> Result<String, SessionTokenError> {
        self.issue_at(account_id, Utc::now().timestamp())
    }

    /// Signs a token with an explicit issue time (unix seconds).
    pub fn issue_at(&self, account_id: Uuid, issued_at: i64) -> Result<String, SessionTokenError> {
        let claims = SessionClaims {
            id: account_id,
            iat: issued_at,
            exp: issued_at + self.expires_in_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionTokenError::Signing(e.to_string()))
    }

    /// Verifies signature and expiry and returns the claims.
    pub fn resolve(&self, token: &str) -> Result<SessionClaims, SessionTokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| SessionTokenError::Invalid)
    }
}
