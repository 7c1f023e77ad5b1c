//! Event domain models.
//!
//! An event embeds its details, supervisors and settings, and references its
//! guests by id. Guest statistics are derived from guest statuses and cached
//! on the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::guest::{Guest, GuestInput, GuestStatus};
use crate::errors::DomainError;

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "ongoing" => Ok(EventStatus::Ongoing),
            "completed" => Ok(EventStatus::Completed),
            "cancelled" => Ok(EventStatus::Cancelled),
            other => Err(DomainError::InvalidValue {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Wedding,
    Birthday,
    Graduation,
    Meeting,
    Conference,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventLocation {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub address: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,

    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[validate(length(max = 200, message = "Event title cannot exceed 200 characters"))]
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub event_type: Option<EventType>,

    pub date: Option<DateTime<Utc>>,

    pub time: Option<String>,

    #[validate(nested)]
    pub location: Option<EventLocation>,

    #[validate(length(max = 1000, message = "Event description cannot exceed 1000 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Supervisor {
    #[validate(length(min = 1, message = "Supervisor name is required"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_phone_length"))]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvitationTemplate {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub colors: TemplateColors,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationSettings {
    pub selected_template: Option<InvitationTemplate>,
    pub invitation_message: Option<String>,
    pub attendance_auto_reply: Option<String>,
    pub absence_auto_reply: Option<String>,
    pub expected_attendance_auto_reply: Option<String>,
    pub template_image: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SendSchedule {
    #[default]
    Now,
    Later,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchSettings {
    #[serde(default)]
    pub send_schedule: SendSchedule,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub scheduled_time: Option<String>,
}

/// Denormalized guest counters stored on the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestStats {
    pub total_invited: i32,
    pub total_confirmed: i32,
    pub total_attended: i32,
}

impl GuestStats {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = GuestStatus>,
    {
        statuses
            .into_iter()
            .fold(GuestStats::default(), |mut stats, status| {
                stats.total_invited += 1;
                match status {
                    GuestStatus::Confirmed => stats.total_confirmed += 1,
                    GuestStatus::Attended => stats.total_attended += 1,
                    _ => {}
                }
                stats
            })
    }
}

/// Per-status counts returned with event statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestStatusBreakdown {
    pub invited: i32,
    pub confirmed: i32,
    pub declined: i32,
    pub attended: i32,
    pub no_response: i32,
}

impl GuestStatusBreakdown {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = GuestStatus>,
    {
        let mut breakdown = GuestStatusBreakdown::default();
        for status in statuses {
            match status {
                GuestStatus::Invited => breakdown.invited += 1,
                GuestStatus::Confirmed => breakdown.confirmed += 1,
                GuestStatus::Declined => breakdown.declined += 1,
                GuestStatus::Attended => breakdown.attended += 1,
                GuestStatus::NoResponse => breakdown.no_response += 1,
            }
        }
        breakdown
    }
}

/// An event as stored, with guests referenced by id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub event_details: EventDetails,
    pub guest_list: Vec<Uuid>,
    pub supervisors_list: Vec<Supervisor>,
    pub invitation_settings: Option<InvitationSettings>,
    pub launch_settings: Option<LaunchSettings>,
    pub host: Uuid,
    pub status: EventStatus,
    pub guest_stats: GuestStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_owned_by(&self, account_id: Uuid) -> bool {
        self.host == account_id
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.event_details.date.is_some_and(|date| date > now)
    }

    /// Replaces guest ids with guest records, in guest-list order.
    ///
    /// Ids without a matching guest are dropped.
    pub fn populate(self, guests: Vec<Guest>) -> PopulatedEvent {
        let mut by_id: std::collections::HashMap<Uuid, Guest> =
            guests.into_iter().map(|g| (g.id, g)).collect();
        let guest_list = self
            .guest_list
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect();

        PopulatedEvent {
            id: self.id,
            event_details: self.event_details,
            guest_list,
            supervisors_list: self.supervisors_list,
            invitation_settings: self.invitation_settings,
            launch_settings: self.launch_settings,
            host: self.host,
            status: self.status,
            guest_stats: self.guest_stats,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// An event with its guest documents embedded, as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedEvent {
    pub id: Uuid,
    pub event_details: EventDetails,
    pub guest_list: Vec<Guest>,
    pub supervisors_list: Vec<Supervisor>,
    pub invitation_settings: Option<InvitationSettings>,
    pub launch_settings: Option<LaunchSettings>,
    pub host: Uuid,
    pub status: EventStatus,
    pub guest_stats: GuestStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(nested)]
    pub event_details: Option<EventDetails>,

    #[serde(default)]
    pub guest_list: Vec<GuestInput>,

    #[serde(default)]
    #[validate(nested)]
    pub supervisors_list: Vec<Supervisor>,

    pub invitation_settings: Option<InvitationSettings>,

    pub launch_settings: Option<LaunchSettings>,
}

/// Body for updating an event. Absent sections are left unchanged; a present
/// guest list replaces the current one.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(nested)]
    pub event_details: Option<EventDetails>,

    pub guest_list: Option<Vec<GuestInput>>,

    #[validate(nested)]
    pub supervisors_list: Option<Vec<Supervisor>>,

    pub invitation_settings: Option<InvitationSettings>,

    pub launch_settings: Option<LaunchSettings>,
}

impl UpdateEventRequest {
    /// Applies the non-guest sections onto `event`.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(details) = &self.event_details {
            event.event_details = details.clone();
        }
        if let Some(supervisors) = &self.supervisors_list {
            event.supervisors_list = supervisors.clone();
        }
        if let Some(settings) = &self.invitation_settings {
            event.invitation_settings = Some(settings.clone());
        }
        if let Some(settings) = &self.launch_settings {
            event.launch_settings = Some(settings.clone());
        }
    }
}
