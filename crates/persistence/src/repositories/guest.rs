//! Guest repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::Guest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::GuestEntity;
use crate::metrics::QueryTimer;

/// Input for inserting a guest. The id and qrcode are assigned by the caller.
#[derive(Debug, Clone)]
pub struct NewGuest<'a> {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub qrcode: &'a str,
    pub invited_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Editable contact fields of a guest.
#[derive(Debug, Clone)]
pub struct GuestDetails<'a> {
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub invited_by: Option<Uuid>,
}

/// Repository for guests.
#[derive(Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    /// Creates a new GuestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, guest: NewGuest<'_>) -> Result<GuestEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_guest");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            INSERT INTO guests (id, event_id, name, phone, email, qrcode, invited_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING id, event_id, name, phone, email, qrcode, status, invited_by,
                      rsvp_responded, rsvp_responded_at, checked_in, checked_in_at,
                      invitation_sent, invitation_sent_at, invitation_method, created_at, updated_at
            "#,
        )
        .bind(guest.id)
        .bind(guest.event_id)
        .bind(guest.name)
        .bind(guest.phone)
        .bind(guest.email)
        .bind(guest.qrcode)
        .bind(guest.invited_by)
        .bind(guest.created_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a guest that belongs to the given event.
    pub async fn find_in_event(
        &self,
        event_id: Uuid,
        guest_id: Uuid,
    ) -> Result<Option<GuestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_guest_in_event");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            SELECT id, event_id, name, phone, email, qrcode, status, invited_by,
                   rsvp_responded, rsvp_responded_at, checked_in, checked_in_at,
                   invitation_sent, invitation_sent_at, invitation_method, created_at, updated_at
            FROM guests
            WHERE id = $1 AND event_id = $2
            "#,
        )
        .bind(guest_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch guests by id, in no particular order.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<GuestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_guests_by_ids");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            SELECT id, event_id, name, phone, email, qrcode, status, invited_by,
                   rsvp_responded, rsvp_responded_at, checked_in, checked_in_at,
                   invitation_sent, invitation_sent_at, invitation_method, created_at, updated_at
            FROM guests
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn ids_by_event(&self, event_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        let timer = QueryTimer::new("guest_ids_by_event");
        let result: Result<Vec<(Uuid,)>, sqlx::Error> =
            sqlx::query_as("SELECT id FROM guests WHERE event_id = $1 ORDER BY created_at")
                .bind(event_id)
                .fetch_all(&self.pool)
                .await;
        timer.record();
        Ok(result?.into_iter().map(|(id,)| id).collect())
    }

    /// Status column of every guest of an event.
    pub async fn statuses_by_event(&self, event_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("guest_statuses_by_event");
        let result: Result<Vec<(String,)>, sqlx::Error> =
            sqlx::query_as("SELECT status FROM guests WHERE event_id = $1")
                .bind(event_id)
                .fetch_all(&self.pool)
                .await;
        timer.record();
        Ok(result?.into_iter().map(|(status,)| status).collect())
    }

    pub async fn update_details(
        &self,
        id: Uuid,
        details: GuestDetails<'_>,
    ) -> Result<GuestEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_guest_details");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            UPDATE guests
            SET name = $2, phone = $3, email = $4, invited_by = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, event_id, name, phone, email, qrcode, status, invited_by,
                      rsvp_responded, rsvp_responded_at, checked_in, checked_in_at,
                      invitation_sent, invitation_sent_at, invitation_method, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(details.name)
        .bind(details.phone)
        .bind(details.email)
        .bind(details.invited_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Persist the status, RSVP, check-in and invitation state of a guest.
    pub async fn save_state(&self, guest: &Guest) -> Result<GuestEntity, sqlx::Error> {
        let timer = QueryTimer::new("save_guest_state");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            UPDATE guests
            SET status = $2,
                rsvp_responded = $3,
                rsvp_responded_at = $4,
                checked_in = $5,
                checked_in_at = $6,
                invitation_sent = $7,
                invitation_sent_at = $8,
                invitation_method = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, event_id, name, phone, email, qrcode, status, invited_by,
                      rsvp_responded, rsvp_responded_at, checked_in, checked_in_at,
                      invitation_sent, invitation_sent_at, invitation_method, created_at, updated_at
            "#,
        )
        .bind(guest.id)
        .bind(guest.status.as_str())
        .bind(guest.rsvp.responded)
        .bind(guest.rsvp.responded_at)
        .bind(guest.check_in.checked_in)
        .bind(guest.check_in.checked_in_at)
        .bind(guest.invitation.sent)
        .bind(guest.invitation.sent_at)
        .bind(guest.invitation.method.map(|m| m.as_str()))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let timer = QueryTimer::new("delete_guests");
        let result = sqlx::query("DELETE FROM guests WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    pub async fn delete_by_event(&self, event_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_guests_by_event");
        let result = sqlx::query("DELETE FROM guests WHERE event_id = $1")
            .bind(event_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_all_guests");
        let result = sqlx::query("DELETE FROM guests").execute(&self.pool).await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
