//! Event and guest aggregate.
//!
//! An event keeps an ordered list of guest ids plus cached counters derived
//! from its guests' statuses. Every write that can move a guest between
//! statuses ends with a recount. The multi-step writes are sequential
//! statements; there is no surrounding transaction.

use chrono::Utc;
use domain::models::event::{CreateEventRequest, UpdateEventRequest};
use domain::models::guest::guest_qrcode;
use domain::models::{
    Account, Event, EventStatus, Guest, GuestInput, GuestStats, GuestStatus, GuestStatusBreakdown,
    InvitationMethod, PopulatedEvent,
};
use domain::services::{plan_guest_reconcile, GuestChange};
use persistence::repositories::{
    EventContent, EventRepository, GuestDetails, GuestRepository, NewGuest,
};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::error::{first_validation_message, ApiError};
use crate::middleware::metrics::record_event_created;

/// Largest page size for event listings.
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    View,
    Update,
    Delete,
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventAction::View => "view",
            EventAction::Update => "update",
            EventAction::Delete => "delete",
        })
    }
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event details are required")]
    DetailsRequired,

    #[error("At least one guest is required")]
    GuestsRequired,

    #[error("{0}")]
    InvalidGuest(String),

    #[error("No event found with that ID")]
    EventNotFound,

    #[error("No guest found with that ID")]
    GuestNotFound,

    #[error("You are not authorized to {0} this event")]
    NotOwner(EventAction),

    #[error("You are not authorized to view events for this host")]
    OtherHost,

    #[error("Only host accounts can manage events")]
    NotAHost,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        let message = err.to_string();
        match err {
            EventError::DetailsRequired
            | EventError::GuestsRequired
            | EventError::InvalidGuest(_) => ApiError::Validation(message),
            EventError::EventNotFound | EventError::GuestNotFound => ApiError::NotFound(message),
            EventError::NotOwner(_) | EventError::OtherHost | EventError::NotAHost => {
                ApiError::Forbidden(message)
            }
            EventError::Database(e) => ApiError::from(e),
        }
    }
}

/// Counters written to the event plus the full per-status split.
#[derive(Debug, Clone, Copy)]
pub struct EventStatistics {
    pub stats: GuestStats,
    pub breakdown: GuestStatusBreakdown,
}

/// One listing page plus the count of every event matching the same scope.
#[derive(Debug, Clone)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub total: i64,
}

/// `LIMIT`/`OFFSET` for a 1-based page. Out of range pages stay in bounds.
fn page_window(page: i64, limit: i64) -> (i64, i64) {
    let limit = limit.clamp(1, MAX_PAGE_SIZE);
    let page = page.clamp(1, i64::MAX / MAX_PAGE_SIZE);
    (limit, (page - 1) * limit)
}

/// Trims, lowercases emails and checks every guest before anything is written.
fn prepare_guests(inputs: Vec<GuestInput>) -> Result<Vec<GuestInput>, EventError> {
    inputs
        .into_iter()
        .map(|input| {
            let input = input.normalized();
            input.validate().map_err(|e| {
                EventError::InvalidGuest(
                    first_validation_message(&e).unwrap_or_else(|| "Invalid guest".to_string()),
                )
            })?;
            Ok(input)
        })
        .collect()
}

#[derive(Clone)]
pub struct EventService {
    events: EventRepository,
    guests: GuestRepository,
}

impl EventService {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            guests: GuestRepository::new(pool),
        }
    }

    pub async fn create_event(
        &self,
        account: &Account,
        request: CreateEventRequest,
    ) -> Result<PopulatedEvent, EventError> {
        let host = account.as_host().ok_or(EventError::NotAHost)?;
        let details = request.event_details.ok_or(EventError::DetailsRequired)?;
        if request.guest_list.is_empty() {
            return Err(EventError::GuestsRequired);
        }
        let guests = prepare_guests(request.guest_list)?;

        let created = self
            .events
            .create(
                host.id,
                EventContent {
                    details: &details,
                    supervisors: &request.supervisors_list,
                    invitation_settings: request.invitation_settings.as_ref(),
                    launch_settings: request.launch_settings.as_ref(),
                },
            )
            .await?;

        let guest_ids = match self.insert_guests(created.id, &guests).await {
            Ok(ids) => ids,
            Err(e) => {
                self.discard_event(created.id).await;
                return Err(e);
            }
        };
        self.events.set_guest_ids(created.id, &guest_ids).await?;
        let event = self.recompute_guest_stats(created.id).await?;

        record_event_created();
        tracing::info!(
            event_id = %event.id,
            host_id = %host.id,
            guests = guest_ids.len(),
            "Event created"
        );
        self.populate(event).await
    }

    async fn insert_guests(
        &self,
        event_id: Uuid,
        guests: &[GuestInput],
    ) -> Result<Vec<Uuid>, EventError> {
        let mut ids = Vec::with_capacity(guests.len());
        for input in guests {
            ids.push(self.insert_guest(event_id, input).await?);
        }
        Ok(ids)
    }

    /// Removes an event whose guest list could not be written.
    async fn discard_event(&self, event_id: Uuid) {
        let result = match self.guests.delete_by_event(event_id).await {
            Ok(_) => self.events.delete(event_id).await.map(|_| ()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            tracing::error!(event_id = %event_id, error = %e, "Failed to discard partial event");
        }
    }

    /// A page of the requester's events, newest first, with the total they own.
    pub async fn list_events(
        &self,
        requester: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<EventPage, EventError> {
        let (limit, offset) = page_window(page, limit);
        let rows = self.events.list_by_host(requester, limit, offset).await?;
        let total = self.events.count_by_host(requester).await?;
        Ok(EventPage {
            events: rows.into_iter().map(Event::from).collect(),
            total,
        })
    }

    pub async fn get_event(&self, id: Uuid, requester: Uuid) -> Result<PopulatedEvent, EventError> {
        let event = self.owned_event(id, requester, EventAction::View).await?;
        self.populate(event).await
    }

    pub async fn update_event(
        &self,
        id: Uuid,
        requester: Uuid,
        request: UpdateEventRequest,
    ) -> Result<PopulatedEvent, EventError> {
        let mut event = self.owned_event(id, requester, EventAction::Update).await?;
        let guests = request.guest_list.clone().map(prepare_guests).transpose()?;

        request.apply_to(&mut event);
        self.events
            .update_content(
                id,
                EventContent {
                    details: &event.event_details,
                    supervisors: &event.supervisors_list,
                    invitation_settings: event.invitation_settings.as_ref(),
                    launch_settings: event.launch_settings.as_ref(),
                },
            )
            .await?;

        if let Some(guests) = guests {
            self.reconcile_guests(id, guests).await?;
        }

        let event = self.recompute_guest_stats(id).await?;
        tracing::info!(event_id = %id, "Event updated");
        self.populate(event).await
    }

    pub async fn delete_event(&self, id: Uuid, requester: Uuid) -> Result<(), EventError> {
        self.owned_event(id, requester, EventAction::Delete).await?;
        let removed_guests = self.guests.delete_by_event(id).await?;
        self.events.delete(id).await?;
        tracing::info!(event_id = %id, removed_guests, "Event deleted");
        Ok(())
    }

    /// Events of `host_id` by event date. Only the host may ask.
    pub async fn events_for_host(
        &self,
        host_id: Uuid,
        requester: Uuid,
    ) -> Result<Vec<Event>, EventError> {
        if host_id != requester {
            return Err(EventError::OtherHost);
        }
        let rows = self.events.list_by_host_by_date(host_id).await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    pub async fn upcoming_events(&self, requester: Uuid) -> Result<Vec<Event>, EventError> {
        let rows = self.events.list_upcoming(requester).await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        requester: Uuid,
        status: EventStatus,
    ) -> Result<Event, EventError> {
        self.owned_event(id, requester, EventAction::Update).await?;
        let updated = self.events.set_status(id, status).await?;
        tracing::info!(event_id = %id, status = %status, "Event status changed");
        Ok(updated.into())
    }

    pub async fn statistics(&self, id: Uuid, requester: Uuid) -> Result<EventStatistics, EventError> {
        self.owned_event(id, requester, EventAction::View).await?;
        let statuses = self.guest_statuses(id).await?;
        let stats = GuestStats::from_statuses(statuses.iter().copied());
        self.events.set_stats(id, stats).await?;
        Ok(EventStatistics {
            stats,
            breakdown: GuestStatusBreakdown::from_statuses(statuses),
        })
    }

    /// Removes every guest and event. Admin only.
    pub async fn delete_all(&self) -> Result<(u64, u64), EventError> {
        let guests = self.guests.delete_all().await?;
        let events = self.events.delete_all().await?;
        tracing::warn!(events, guests, "All events deleted");
        Ok((events, guests))
    }

    pub async fn update_guest_status(
        &self,
        event_id: Uuid,
        guest_id: Uuid,
        requester: Uuid,
        status: GuestStatus,
    ) -> Result<Guest, EventError> {
        let mut guest = self.owned_guest(event_id, guest_id, requester).await?;
        guest.set_status(status, Utc::now());
        let saved = self.guests.save_state(&guest).await?;
        self.recompute_guest_stats(event_id).await?;
        Ok(saved.into())
    }

    pub async fn check_in_guest(
        &self,
        event_id: Uuid,
        guest_id: Uuid,
        requester: Uuid,
    ) -> Result<Guest, EventError> {
        let mut guest = self.owned_guest(event_id, guest_id, requester).await?;
        guest.perform_check_in(Utc::now());
        let saved = self.guests.save_state(&guest).await?;
        self.recompute_guest_stats(event_id).await?;
        tracing::info!(event_id = %event_id, guest_id = %guest_id, "Guest checked in");
        Ok(saved.into())
    }

    pub async fn send_invitation(
        &self,
        event_id: Uuid,
        guest_id: Uuid,
        requester: Uuid,
        method: InvitationMethod,
    ) -> Result<Guest, EventError> {
        let mut guest = self.owned_guest(event_id, guest_id, requester).await?;
        guest.send_invitation(method, Utc::now());
        let saved = self.guests.save_state(&guest).await?;
        Ok(saved.into())
    }

    /// Recounts the event's guests and stores the counters.
    pub async fn recompute_guest_stats(&self, event_id: Uuid) -> Result<Event, EventError> {
        let statuses = self.guest_statuses(event_id).await?;
        let updated = self
            .events
            .set_stats(event_id, GuestStats::from_statuses(statuses))
            .await?;
        Ok(updated.into())
    }

    async fn guest_statuses(&self, event_id: Uuid) -> Result<Vec<GuestStatus>, EventError> {
        let raw = self.guests.statuses_by_event(event_id).await?;
        Ok(raw.iter().filter_map(|s| s.parse().ok()).collect())
    }

    async fn owned_event(
        &self,
        id: Uuid,
        requester: Uuid,
        action: EventAction,
    ) -> Result<Event, EventError> {
        let event: Event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or(EventError::EventNotFound)?
            .into();

        if !event.is_owned_by(requester) {
            tracing::warn!(event_id = %id, requester = %requester, action = %action, "Event access denied");
            return Err(EventError::NotOwner(action));
        }
        Ok(event)
    }

    async fn owned_guest(
        &self,
        event_id: Uuid,
        guest_id: Uuid,
        requester: Uuid,
    ) -> Result<Guest, EventError> {
        self.owned_event(event_id, requester, EventAction::Update)
            .await?;
        let guest = self
            .guests
            .find_in_event(event_id, guest_id)
            .await?
            .ok_or(EventError::GuestNotFound)?;
        Ok(guest.into())
    }

    async fn insert_guest(&self, event_id: Uuid, input: &GuestInput) -> Result<Uuid, EventError> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let qrcode = guest_qrcode(id, created_at);

        self.guests
            .create(NewGuest {
                id,
                event_id,
                name: &input.name,
                phone: input.phone.as_deref(),
                email: input.email.as_deref(),
                qrcode: &qrcode,
                invited_by: input.invited_by,
                created_at,
            })
            .await?;
        Ok(id)
    }

    /// Makes the event's guests match `incoming`: drops the missing ones,
    /// updates the ones it still names and creates the rest.
    async fn reconcile_guests(
        &self,
        event_id: Uuid,
        incoming: Vec<GuestInput>,
    ) -> Result<(), EventError> {
        let existing = self.guests.ids_by_event(event_id).await?;
        let plan = plan_guest_reconcile(&existing, incoming);

        let removed = self.guests.delete_many(&plan.remove).await?;
        tracing::debug!(
            event_id = %event_id,
            updates = plan.updates(),
            creates = plan.creates(),
            removed,
            "Reconciling guest list"
        );

        let mut guest_ids = Vec::with_capacity(plan.changes.len());
        for change in &plan.changes {
            match change {
                GuestChange::Update(id, input) => {
                    self.guests
                        .update_details(
                            *id,
                            GuestDetails {
                                name: &input.name,
                                phone: input.phone.as_deref(),
                                email: input.email.as_deref(),
                                invited_by: input.invited_by,
                            },
                        )
                        .await?;
                    guest_ids.push(*id);
                }
                GuestChange::Create(input) => {
                    guest_ids.push(self.insert_guest(event_id, input).await?);
                }
            }
        }

        self.events.set_guest_ids(event_id, &guest_ids).await?;
        Ok(())
    }

    async fn populate(&self, event: Event) -> Result<PopulatedEvent, EventError> {
        let guests = self.guests.find_by_ids(&event.guest_list).await?;
        Ok(event.populate(guests.into_iter().map(Guest::from).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn guest(name: &str, phone: Option<&str>, email: Option<&str>) -> GuestInput {
        GuestInput {
            id: None,
            name: name.to_string(),
            phone: phone.map(str::to_string),
            email: email.map(str::to_string),
            invited_by: None,
        }
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 100), (100, 0));
        assert_eq!(page_window(3, 10), (10, 20));
        assert_eq!(page_window(0, 0), (1, 0));
        assert_eq!(page_window(-5, 500), (MAX_PAGE_SIZE, 0));

        let (limit, offset) = page_window(i64::MAX, i64::MAX);
        assert_eq!(limit, MAX_PAGE_SIZE);
        assert!(offset >= 0);
        assert!(offset.checked_add(limit).is_some());
    }

    #[test]
    fn test_prepare_guests_normalizes() {
        let prepared =
            prepare_guests(vec![guest("  Huda ", Some(" "), Some("Huda@Example.COM"))]).unwrap();
        assert_eq!(prepared[0].name, "Huda");
        assert_eq!(prepared[0].phone, None);
        assert_eq!(prepared[0].email.as_deref(), Some("huda@example.com"));
    }

    #[test]
    fn test_prepare_guests_requires_contact() {
        let err = prepare_guests(vec![guest("Omar", Some("  "), None)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Either phone number or email address is required"
        );
    }

    #[test]
    fn test_owner_messages() {
        assert_eq!(
            EventError::NotOwner(EventAction::View).to_string(),
            "You are not authorized to view this event"
        );
        assert_eq!(
            EventError::NotOwner(EventAction::Delete).to_string(),
            "You are not authorized to delete this event"
        );
    }

    #[test]
    fn test_error_statuses() {
        let status = |e: EventError| ApiError::from(e).status_code();
        assert_eq!(status(EventError::DetailsRequired), StatusCode::BAD_REQUEST);
        assert_eq!(status(EventError::EventNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status(EventError::GuestNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status(EventError::OtherHost), StatusCode::FORBIDDEN);
        assert_eq!(status(EventError::NotAHost), StatusCode::FORBIDDEN);
    }
}
