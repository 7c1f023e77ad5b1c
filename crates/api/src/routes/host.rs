//! Host-only account settings.

use axum::{extract::State, Json};
use domain::models::notification::UpdateNotificationPreferencesRequest;
use domain::models::{Account, NotificationPreferences};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentAccount, JsonBody};
use crate::routes::Success;

fn host_id(account: &Account) -> Result<Uuid, ApiError> {
    account.as_host().map(|host| host.id).ok_or_else(|| {
        ApiError::Forbidden("Only host accounts can manage notification preferences".to_string())
    })
}

/// GET /api/host/notifications
pub async fn get_notifications(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<Success<NotificationPreferences>>, ApiError> {
    let preferences = state
        .notification_service()
        .get(host_id(&account)?)
        .await?;
    Ok(Json(Success::data(preferences)))
}

/// PATCH /api/host/notifications
pub async fn update_notifications(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    JsonBody(patch): JsonBody<UpdateNotificationPreferencesRequest>,
) -> Result<Json<Success<NotificationPreferences>>, ApiError> {
    let host_id = host_id(&account)?;
    if patch.is_empty() {
        return Err(ApiError::Validation(
            "Please provide notification preferences to update".to_string(),
        ));
    }

    let preferences = state.notification_service().update(host_id, &patch).await?;
    Ok(Json(
        Success::data(preferences).with_message("Notification preferences updated successfully"),
    ))
}
