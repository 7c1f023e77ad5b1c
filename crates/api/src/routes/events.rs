//! Event and guest routes. Every handler runs behind `protect`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::event::{CreateEventRequest, UpdateEventRequest};
use domain::models::{
    Event, EventStatus, Guest, GuestStats, GuestStatus, GuestStatusBreakdown, InvitationMethod,
    PopulatedEvent,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentAccount, JsonBody, ValidatedJson};
use crate::routes::Success;
use crate::services::events::MAX_PAGE_SIZE;

#[derive(Debug, Clone, Deserialize)]
pub struct ListEventsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListEventsQuery {
    fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    fn limit(&self) -> i64 {
        self.limit.unwrap_or(MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusBody {
    pub status: Option<String>,
}

impl StatusBody {
    /// Parses the status, distinguishing absent from unknown.
    fn parse<T: std::str::FromStr>(&self) -> Result<T, ApiError> {
        let raw = self
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::Validation("Status is required".to_string()))?;
        raw.parse()
            .map_err(|_| ApiError::Validation("Invalid status value".to_string()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvitationBody {
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventData<T> {
    pub event: T,
}

#[derive(Debug, Serialize)]
pub struct EventsData {
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize)]
pub struct GuestData {
    pub guest: Guest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub stats: GuestStats,
    pub guest_status_breakdown: GuestStatusBreakdown,
}

type EventsResponse = Json<Success<EventsData>>;

fn events_response(events: Vec<Event>) -> EventsResponse {
    Json(Success::list(events.len(), EventsData { events }))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<Success<EventData<PopulatedEvent>>>), ApiError> {
    let event = state.event_service().create_event(&account, request).await?;
    Ok((StatusCode::CREATED, Json(Success::data(EventData { event }))))
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Query(query): Query<ListEventsQuery>,
) -> Result<EventsResponse, ApiError> {
    let page = state
        .event_service()
        .list_events(account.id(), query.page(), query.limit())
        .await?;
    let total = usize::try_from(page.total).unwrap_or_default();
    Ok(Json(Success::list(total, EventsData { events: page.events })))
}

/// GET /api/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<Success<EventData<PopulatedEvent>>>, ApiError> {
    let event = state.event_service().get_event(id, account.id()).await?;
    Ok(Json(Success::data(EventData { event })))
}

/// PATCH /api/events/:id
pub async fn update_event(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> Result<Json<Success<EventData<PopulatedEvent>>>, ApiError> {
    let event = state
        .event_service()
        .update_event(id, account.id(), request)
        .await?;
    Ok(Json(Success::data(EventData { event })))
}

/// DELETE /api/events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.event_service().delete_event(id, account.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/events/my-events
pub async fn my_events(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<EventsResponse, ApiError> {
    let events = state
        .event_service()
        .events_for_host(account.id(), account.id())
        .await?;
    Ok(events_response(events))
}

/// GET /api/events/host/:hostId
pub async fn host_events(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(host_id): Path<Uuid>,
) -> Result<EventsResponse, ApiError> {
    let events = state
        .event_service()
        .events_for_host(host_id, account.id())
        .await?;
    Ok(events_response(events))
}

/// GET /api/events/upcoming
pub async fn upcoming_events(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<EventsResponse, ApiError> {
    let events = state.event_service().upcoming_events(account.id()).await?;
    Ok(events_response(events))
}

/// PATCH /api/events/:id/status
pub async fn update_event_status(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
    JsonBody(body): JsonBody<StatusBody>,
) -> Result<Json<Success<EventData<Event>>>, ApiError> {
    let status: EventStatus = body.parse()?;
    let event = state
        .event_service()
        .update_status(id, account.id(), status)
        .await?;
    Ok(Json(Success::data(EventData { event })))
}

/// GET /api/events/:id/stats
pub async fn event_stats(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<Success<StatsData>>, ApiError> {
    let statistics = state.event_service().statistics(id, account.id()).await?;
    Ok(Json(Success::data(StatsData {
        stats: statistics.stats,
        guest_status_breakdown: statistics.breakdown,
    })))
}

/// DELETE /api/events/admin/delete-all
pub async fn delete_all_events(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.event_service().delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/events/:id/guests/:guestId/status
pub async fn update_guest_status(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path((event_id, guest_id)): Path<(Uuid, Uuid)>,
    JsonBody(body): JsonBody<StatusBody>,
) -> Result<Json<Success<GuestData>>, ApiError> {
    let status: GuestStatus = body.parse()?;
    let guest = state
        .event_service()
        .update_guest_status(event_id, guest_id, account.id(), status)
        .await?;
    Ok(Json(Success::data(GuestData { guest })))
}

/// POST /api/events/:id/guests/:guestId/check-in
pub async fn check_in_guest(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path((event_id, guest_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Success<GuestData>>, ApiError> {
    let guest = state
        .event_service()
        .check_in_guest(event_id, guest_id, account.id())
        .await?;
    Ok(Json(Success::data(GuestData { guest })))
}

/// POST /api/events/:id/guests/:guestId/invitation
///
/// The body is optional; the method defaults to email.
pub async fn send_invitation(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path((event_id, guest_id)): Path<(Uuid, Uuid)>,
    body: Option<JsonBody<InvitationBody>>,
) -> Result<Json<Success<GuestData>>, ApiError> {
    let body = body.map(|JsonBody(b)| b).unwrap_or_default();
    let method = match body.method.as_deref().map(str::trim) {
        None | Some("") => InvitationMethod::default(),
        Some(raw) => raw.parse().map_err(|_| {
            ApiError::Validation("Invalid invitation method".to_string())
        })?,
    };

    let guest = state
        .event_service()
        .send_invitation(event_id, guest_id, account.id(), method)
        .await?;
    Ok(Json(Success::data(GuestData { guest })))
}
