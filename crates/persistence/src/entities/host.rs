//! Host account entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{AccountRole, Credentials, Host};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the hosts table.
#[derive(Debug, Clone, FromRow)]
pub struct HostEntity {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_number: String,
    pub role: String,
    pub email_verified: bool,
    pub profile_completed: bool,
    pub password_hash: Option<String>,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HostEntity> for Host {
    fn from(entity: HostEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            phone_number: entity.phone_number,
            role: entity.role.parse().unwrap_or(AccountRole::User),
            email_verified: entity.email_verified,
            profile_completed: entity.profile_completed,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> HostEntity {
        HostEntity {
            id: Uuid::new_v4(),
            username: None,
            email: None,
            phone_number: "0501112222".to_string(),
            role: "admin".to_string(),
            email_verified: false,
            profile_completed: false,
            password_hash: None,
            password_changed_at: None,
            password_reset_token: Some("deadbeef".to_string()),
            password_reset_expires: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_host_entity_to_domain() {
        let e = entity();
        let host: Host = e.clone().into();
        assert_eq!(host.id, e.id);
        assert_eq!(host.role, AccountRole::Admin);
        assert!(!host.profile_completed);
        assert!(!host.credentials.has_password());
        assert_eq!(host.credentials.password_reset_token.as_deref(), Some("deadbeef"));
    }

    #[test]
    fn test_unknown_role_falls_back_to_user() {
        let mut e = entity();
        e.role = "owner".to_string();
        let host: Host = e.into();
        assert_eq!(host.role, AccountRole::User);
    }
}
