//! Notification preferences entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::notification::{AppNotifications, EmailNotifications, NotificationPreferences};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the notification_preferences table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationPreferencesEntity {
    pub id: Uuid,
    pub host_id: Uuid,
    pub app_notifications: Json<AppNotifications>,
    pub email_notifications: Json<EmailNotifications>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NotificationPreferencesEntity> for NotificationPreferences {
    fn from(entity: NotificationPreferencesEntity) -> Self {
        Self {
            app_notifications: entity.app_notifications.0,
            email_notifications: entity.email_notifications.0,
        }
    }
}
