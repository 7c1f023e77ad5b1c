//! OTP entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{OtpRecord, OtpUserType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the otps table.
#[derive(Debug, Clone, FromRow)]
pub struct OtpEntity {
    pub id: Uuid,
    pub phone_number: String,
    pub otp_code: String,
    pub user_type: String,
    pub user_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<OtpEntity> for OtpRecord {
    fn from(entity: OtpEntity) -> Self {
        Self {
            id: entity.id,
            phone_number: entity.phone_number,
            otp_code: entity.otp_code,
            // The column is constrained to the three known values.
            user_type: entity.user_type.parse().unwrap_or(OtpUserType::Signup),
            user_id: entity.user_id,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
        }
    }
}
