//! Host notification preferences.

use domain::models::notification::UpdateNotificationPreferencesRequest;
use domain::models::NotificationPreferences;
use persistence::repositories::NotificationPreferencesRepository;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationPreferencesService {
    repo: NotificationPreferencesRepository,
}

impl NotificationPreferencesService {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            repo: NotificationPreferencesRepository::new(pool),
        }
    }

    /// Stored preferences, writing the defaults on first access.
    pub async fn get(&self, host_id: Uuid) -> Result<NotificationPreferences, sqlx::Error> {
        if let Some(existing) = self.repo.find_by_host(host_id).await? {
            return Ok(existing.into());
        }

        let defaults = NotificationPreferences::default();
        let created = self.repo.upsert(host_id, &defaults).await?;
        tracing::debug!(host_id = %host_id, "Created default notification preferences");
        Ok(created.into())
    }

    pub async fn update(
        &self,
        host_id: Uuid,
        patch: &UpdateNotificationPreferencesRequest,
    ) -> Result<NotificationPreferences, sqlx::Error> {
        let current = self
            .repo
            .find_by_host(host_id)
            .await?
            .map(NotificationPreferences::from)
            .unwrap_or_default();

        let saved = self.repo.upsert(host_id, &current.merged(patch)).await?;
        tracing::info!(host_id = %host_id, "Notification preferences updated");
        Ok(saved.into())
    }
}
