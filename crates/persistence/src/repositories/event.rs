//! Event repository for database operations.

use domain::models::event::{
    EventDetails, EventStatus, GuestStats, InvitationSettings, LaunchSettings, Supervisor,
};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventEntity;
use crate::metrics::QueryTimer;

/// Embedded sections written together on create and update.
#[derive(Debug, Clone, Copy)]
pub struct EventContent<'a> {
    pub details: &'a EventDetails,
    pub supervisors: &'a [Supervisor],
    pub invitation_settings: Option<&'a InvitationSettings>,
    pub launch_settings: Option<&'a LaunchSettings>,
}

/// Repository for events.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert an event with no guests yet.
    pub async fn create(
        &self,
        host_id: Uuid,
        content: EventContent<'_>,
    ) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events
                (host_id, event_details, supervisors, invitation_settings, launch_settings, event_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, host_id, event_details, supervisors, invitation_settings, launch_settings,
                      status, guest_ids, total_invited, total_confirmed, total_attended, event_date,
                      created_at, updated_at
            "#,
        )
        .bind(host_id)
        .bind(Json(content.details))
        .bind(Json(content.supervisors))
        .bind(content.invitation_settings.map(Json))
        .bind(content.launch_settings.map(Json))
        .bind(content.details.date)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, host_id, event_details, supervisors, invitation_settings, launch_settings,
                   status, guest_ids, total_invited, total_confirmed, total_attended, event_date,
                   created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Newest-first page of a host's events.
    pub async fn list_by_host(
        &self,
        host_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events_by_host");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, host_id, event_details, supervisors, invitation_settings, launch_settings,
                   status, guest_ids, total_invited, total_confirmed, total_attended, event_date,
                   created_at, updated_at
            FROM events
            WHERE host_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(host_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn count_by_host(&self, host_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_events_by_host");
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events WHERE host_id = $1")
            .bind(host_id)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// A host's events by event date, latest first. Undated events go last.
    pub async fn list_by_host_by_date(&self, host_id: Uuid) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events_by_host_date");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, host_id, event_details, supervisors, invitation_settings, launch_settings,
                   status, guest_ids, total_invited, total_confirmed, total_attended, event_date,
                   created_at, updated_at
            FROM events
            WHERE host_id = $1
            ORDER BY event_date DESC NULLS LAST, created_at DESC
            "#,
        )
        .bind(host_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// A host's events dated in the future, soonest first.
    pub async fn list_upcoming(&self, host_id: Uuid) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_upcoming_events");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, host_id, event_details, supervisors, invitation_settings, launch_settings,
                   status, guest_ids, total_invited, total_confirmed, total_attended, event_date,
                   created_at, updated_at
            FROM events
            WHERE host_id = $1 AND event_date > NOW()
            ORDER BY event_date ASC
            "#,
        )
        .bind(host_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Overwrite the embedded sections of an event.
    pub async fn update_content(
        &self,
        id: Uuid,
        content: EventContent<'_>,
    ) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_event_content");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events
            SET event_details = $2,
                supervisors = $3,
                invitation_settings = $4,
                launch_settings = $5,
                event_date = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, host_id, event_details, supervisors, invitation_settings, launch_settings,
                      status, guest_ids, total_invited, total_confirmed, total_attended, event_date,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(Json(content.details))
        .bind(Json(content.supervisors))
        .bind(content.invitation_settings.map(Json))
        .bind(content.launch_settings.map(Json))
        .bind(content.details.date)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace the ordered guest reference list.
    pub async fn set_guest_ids(&self, id: Uuid, guest_ids: &[Uuid]) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("set_event_guest_ids");
        let result = sqlx::query(
            "UPDATE events SET guest_ids = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(guest_ids)
        .execute(&self.pool)
        .await;
        timer.record();
        result.map(|_| ())
    }

    /// Store recomputed guest counters.
    pub async fn set_stats(&self, id: Uuid, stats: GuestStats) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("set_event_stats");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events
            SET total_invited = $2,
                total_confirmed = $3,
                total_attended = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, host_id, event_details, supervisors, invitation_settings, launch_settings,
                      status, guest_ids, total_invited, total_confirmed, total_attended, event_date,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(stats.total_invited)
        .bind(stats.total_confirmed)
        .bind(stats.total_attended)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: EventStatus,
    ) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("set_event_status");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, host_id, event_details, supervisors, invitation_settings, launch_settings,
                      status, guest_ids, total_invited, total_confirmed, total_attended, event_date,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Remove every event. Guests go with them through the foreign key.
    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_all_events");
        let result = sqlx::query("DELETE FROM events").execute(&self.pool).await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
