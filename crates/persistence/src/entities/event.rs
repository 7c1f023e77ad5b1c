//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::event::{
    Event, EventDetails, EventStatus, GuestStats, InvitationSettings, LaunchSettings, Supervisor,
};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub host_id: Uuid,
    pub event_details: Json<EventDetails>,
    pub supervisors: Json<Vec<Supervisor>>,
    pub invitation_settings: Option<Json<InvitationSettings>>,
    pub launch_settings: Option<Json<LaunchSettings>>,
    pub status: String,
    pub guest_ids: Vec<Uuid>,
    pub total_invited: i32,
    pub total_confirmed: i32,
    pub total_attended: i32,
    pub event_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            event_details: entity.event_details.0,
            guest_list: entity.guest_ids,
            supervisors_list: entity.supervisors.0,
            invitation_settings: entity.invitation_settings.map(|s| s.0),
            launch_settings: entity.launch_settings.map(|s| s.0),
            host: entity.host_id,
            status: entity.status.parse().unwrap_or(EventStatus::Draft),
            guest_stats: GuestStats {
                total_invited: entity.total_invited,
                total_confirmed: entity.total_confirmed,
                total_attended: entity.total_attended,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_entity_to_domain() {
        let guests = vec![Uuid::new_v4(), Uuid::new_v4()];
        let entity = EventEntity {
            id: Uuid::new_v4(),
            host_id: Uuid::new_v4(),
            event_details: Json(EventDetails {
                title: Some("Graduation".to_string()),
                event_type: None,
                date: None,
                time: None,
                location: None,
                description: None,
            }),
            supervisors: Json(vec![]),
            invitation_settings: None,
            launch_settings: None,
            status: "published".to_string(),
            guest_ids: guests.clone(),
            total_invited: 2,
            total_confirmed: 1,
            total_attended: 0,
            event_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let event: Event = entity.clone().into();
        assert_eq!(event.host, entity.host_id);
        assert_eq!(event.status, EventStatus::Published);
        assert_eq!(event.guest_list, guests);
        assert_eq!(event.guest_stats.total_confirmed, 1);
        assert_eq!(event.event_details.title.as_deref(), Some("Graduation"));
    }
}
