//! Guest entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::guest::{CheckIn, Guest, GuestStatus, Invitation, Rsvp};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the guests table.
#[derive(Debug, Clone, FromRow)]
pub struct GuestEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub qrcode: Option<String>,
    pub status: String,
    pub invited_by: Option<Uuid>,
    pub rsvp_responded: bool,
    pub rsvp_responded_at: Option<DateTime<Utc>>,
    pub checked_in: bool,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub invitation_sent: bool,
    pub invitation_sent_at: Option<DateTime<Utc>>,
    pub invitation_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GuestEntity> for Guest {
    fn from(entity: GuestEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            phone: entity.phone,
            email: entity.email,
            event: entity.event_id,
            qrcode: entity.qrcode,
            status: entity.status.parse().unwrap_or(GuestStatus::Invited),
            invited_by: entity.invited_by,
            rsvp: Rsvp {
                responded: entity.rsvp_responded,
                responded_at: entity.rsvp_responded_at,
            },
            check_in: CheckIn {
                checked_in: entity.checked_in,
                checked_in_at: entity.checked_in_at,
            },
            invitation: Invitation {
                sent: entity.invitation_sent,
                sent_at: entity.invitation_sent_at,
                method: entity.invitation_method.and_then(|m| m.parse().ok()),
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
