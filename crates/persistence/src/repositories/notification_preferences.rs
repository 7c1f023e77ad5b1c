//! Notification preferences repository.

use domain::models::notification::NotificationPreferences;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NotificationPreferencesEntity;
use crate::metrics::QueryTimer;

/// Repository for per-host notification preferences.
#[derive(Clone)]
pub struct NotificationPreferencesRepository {
    pool: PgPool,
}

impl NotificationPreferencesRepository {
    /// Creates a new NotificationPreferencesRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_host(
        &self,
        host_id: Uuid,
    ) -> Result<Option<NotificationPreferencesEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_notification_preferences");
        let result = sqlx::query_as::<_, NotificationPreferencesEntity>(
            r#"
            SELECT id, host_id, app_notifications, email_notifications, created_at, updated_at
            FROM notification_preferences
            WHERE host_id = $1
            "#,
        )
        .bind(host_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert or overwrite the preferences row of a host.
    pub async fn upsert(
        &self,
        host_id: Uuid,
        preferences: &NotificationPreferences,
    ) -> Result<NotificationPreferencesEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_notification_preferences");
        let result = sqlx::query_as::<_, NotificationPreferencesEntity>(
            r#"
            INSERT INTO notification_preferences (host_id, app_notifications, email_notifications)
            VALUES ($1, $2, $3)
            ON CONFLICT (host_id) DO UPDATE
            SET app_notifications = EXCLUDED.app_notifications,
                email_notifications = EXCLUDED.email_notifications,
                updated_at = NOW()
            RETURNING id, host_id, app_notifications, email_notifications, created_at, updated_at
            "#,
        )
        .bind(host_id)
        .bind(Json(&preferences.app_notifications))
        .bind(Json(&preferences.email_notifications))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
