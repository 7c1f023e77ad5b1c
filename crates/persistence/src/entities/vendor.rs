//! Vendor account entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{AccountRole, Credentials, Vendor, VendorProfile};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the vendors table.
///
/// The onboarding profile is kept whole in a JSONB column.
#[derive(Debug, Clone, FromRow)]
pub struct VendorEntity {
    pub id: Uuid,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub profile: Json<VendorProfile>,
    pub password_hash: Option<String>,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VendorEntity> for Vendor {
    fn from(entity: VendorEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            phone_number: entity.phone_number,
            role: entity.role.parse().unwrap_or(AccountRole::User),
            profile: entity.profile.0,
            credentials: Credentials {
                password_hash: entity.password_hash,
                password_changed_at: entity.password_changed_at,
                password_reset_token: entity.password_reset_token,
                password_reset_expires: entity.password_reset_expires,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
