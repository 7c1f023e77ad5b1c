//! White-label partner entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::white_label::{BrandIdentity, LoginData, SystemRequirements, WhiteLabel};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the white_labels table. The password hash is
/// never selected back.
#[derive(Debug, Clone, FromRow)]
pub struct WhiteLabelEntity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub identity: Json<BrandIdentity>,
    pub login_data: Json<LoginData>,
    pub system_requirements: Json<SystemRequirements>,
    pub created_at: DateTime<Utc>,
}

impl From<WhiteLabelEntity> for WhiteLabel {
    fn from(entity: WhiteLabelEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            phone_number: entity.phone_number,
            identity: entity.identity.0,
            login_data: entity.login_data.0,
            system_requirements: entity.system_requirements.0,
            created_at: entity.created_at,
        }
    }
}
