//! OTP repository for database operations.
//!
//! Every read is restricted to unexpired rows, so an expired code behaves
//! exactly like one that was never issued.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::OtpEntity;
use crate::metrics::QueryTimer;

/// Repository for phone verification codes.
#[derive(Clone)]
pub struct OtpRepository {
    pool: PgPool,
}

impl OtpRepository {
    /// Creates a new OtpRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete every code issued to a phone number.
    pub async fn delete_by_phone(&self, phone_number: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_otps_by_phone");
        let result = sqlx::query("DELETE FROM otps WHERE phone_number = $1")
            .bind(phone_number)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Store a code for a phone number, replacing any row left for it.
    pub async fn create(
        &self,
        phone_number: &str,
        otp_code: &str,
        user_type: &str,
        user_id: Option<Uuid>,
        expires_at: DateTime<Utc>,
    ) -> Result<OtpEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_otp");
        let result = sqlx::query_as::<_, OtpEntity>(
            r#"
            INSERT INTO otps (phone_number, otp_code, user_type, user_id, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (phone_number) DO UPDATE
            SET otp_code = EXCLUDED.otp_code,
                user_type = EXCLUDED.user_type,
                user_id = EXCLUDED.user_id,
                expires_at = EXCLUDED.expires_at,
                created_at = NOW()
            RETURNING id, phone_number, otp_code, user_type, user_id, expires_at, created_at
            "#,
        )
        .bind(phone_number)
        .bind(otp_code)
        .bind(user_type)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Atomically take a matching live code. A second call with the same
    /// code returns `None`.
    pub async fn consume(
        &self,
        phone_number: &str,
        otp_code: &str,
    ) -> Result<Option<OtpEntity>, sqlx::Error> {
        let timer = QueryTimer::new("consume_otp");
        let result = sqlx::query_as::<_, OtpEntity>(
            r#"
            DELETE FROM otps
            WHERE phone_number = $1 AND otp_code = $2 AND expires_at > NOW()
            RETURNING id, phone_number, otp_code, user_type, user_id, expires_at, created_at
            "#,
        )
        .bind(phone_number)
        .bind(otp_code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_otp_by_id");
        let result = sqlx::query("DELETE FROM otps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Purge codes past their expiry. Returns the number of rows removed.
    pub async fn delete_expired(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_expired_otps");
        let result = sqlx::query("DELETE FROM otps WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
