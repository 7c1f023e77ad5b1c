//! Phone verification codes.
//!
//! One live code per phone number. Issuing replaces whatever was there;
//! verifying deletes the matching row in the same statement, so a code works
//! exactly once.

use chrono::Utc;
use domain::models::otp::{otp_expiry, OtpRecord, OtpUserType};
use persistence::repositories::OtpRepository;
use shared::crypto::generate_otp_code;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct IssuedOtp {
    pub id: Uuid,
    pub code: String,
}

#[derive(Clone)]
pub struct OtpLedger {
    repo: OtpRepository,
    ttl_secs: i64,
}

impl OtpLedger {
    pub fn new(pool: PgPool, ttl_secs: i64) -> Self {
        Self {
            repo: OtpRepository::new(pool),
            ttl_secs,
        }
    }

    pub async fn issue(
        &self,
        phone_number: &str,
        user_type: OtpUserType,
        user_id: Option<Uuid>,
    ) -> Result<IssuedOtp, sqlx::Error> {
        let replaced = self.repo.delete_by_phone(phone_number).await?;
        if replaced > 0 {
            tracing::debug!(phone_number = %phone_number, "Replaced previous OTP");
        }

        let code = generate_otp_code();
        let expires_at = otp_expiry(Utc::now(), self.ttl_secs);
        let entity = self
            .repo
            .create(phone_number, &code, user_type.as_str(), user_id, expires_at)
            .await?;

        Ok(IssuedOtp {
            id: entity.id,
            code,
        })
    }

    /// Takes the live record matching both values. Wrong, used and expired
    /// codes all come back as `None`.
    pub async fn verify(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<Option<OtpRecord>, sqlx::Error> {
        Ok(self
            .repo
            .consume(phone_number, code)
            .await?
            .map(OtpRecord::from))
    }

    /// Removes an issued record whose delivery failed.
    pub async fn revoke(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        self.repo.delete_by_id(id).await
    }

    pub async fn purge_expired(&self) -> Result<u64, sqlx::Error> {
        self.repo.delete_expired().await
    }
}
