//! Host notification preferences.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppNotifications {
    pub event_updates: bool,
    pub event_dates: bool,
    pub package_renewal: bool,
    pub system_interactions: bool,
}

impl Default for AppNotifications {
    fn default() -> Self {
        Self {
            event_updates: true,
            event_dates: true,
            package_renewal: true,
            system_interactions: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotifications {
    pub event_updates: bool,
    pub event_dates: bool,
    pub package_renewal: bool,
    pub before_sending_invitations: bool,
    pub after_sending_invitations: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub app_notifications: AppNotifications,
    pub email_notifications: EmailNotifications,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppNotificationsPatch {
    pub event_updates: Option<bool>,
    pub event_dates: Option<bool>,
    pub package_renewal: Option<bool>,
    pub system_interactions: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotificationsPatch {
    pub event_updates: Option<bool>,
    pub event_dates: Option<bool>,
    pub package_renewal: Option<bool>,
    pub before_sending_invitations: Option<bool>,
    pub after_sending_invitations: Option<bool>,
}

/// Partial update; keys left out keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationPreferencesRequest {
    pub app_notifications: Option<AppNotificationsPatch>,
    pub email_notifications: Option<EmailNotificationsPatch>,
}

impl UpdateNotificationPreferencesRequest {
    pub fn is_empty(&self) -> bool {
        self.app_notifications.is_none() && self.email_notifications.is_none()
    }
}

impl NotificationPreferences {
    /// Returns a copy with every provided key overwritten.
    pub fn merged(mut self, patch: &UpdateNotificationPreferencesRequest) -> Self {
        if let Some(app) = &patch.app_notifications {
            let target = &mut self.app_notifications;
            target.event_updates = app.event_updates.unwrap_or(target.event_updates);
            target.event_dates = app.event_dates.unwrap_or(target.event_dates);
            target.package_renewal = app.package_renewal.unwrap_or(target.package_renewal);
            target.system_interactions = app
                .system_interactions
                .unwrap_or(target.system_interactions);
        }
        if let Some(email) = &patch.email_notifications {
            let target = &mut self.email_notifications;
            target.event_updates = email.event_updates.unwrap_or(target.event_updates);
            target.event_dates = email.event_dates.unwrap_or(target.event_dates);
            target.package_renewal = email.package_renewal.unwrap_or(target.package_renewal);
            target.before_sending_invitations = email
                .before_sending_invitations
                .unwrap_or(target.before_sending_invitations);
            target.after_sending_invitations = email
                .after_sending_invitations
                .unwrap_or(target.after_sending_invitations);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let prefs = NotificationPreferences::default();
        assert!(prefs.app_notifications.event_updates);
        assert!(prefs.app_notifications.system_interactions);
        assert!(!prefs.email_notifications.event_updates);
        assert!(!prefs.email_notifications.after_sending_invitations);
    }

    #[test]
    fn test_merge_only_touches_given_keys() {
        let patch: UpdateNotificationPreferencesRequest = serde_json::from_value(json!({
            "appNotifications": { "packageRenewal": false },
            "emailNotifications": { "beforeSendingInvitations": true }
        }))
        .unwrap();

        let merged = NotificationPreferences::default().merged(&patch);
        assert!(!merged.app_notifications.package_renewal);
        assert!(merged.app_notifications.event_updates);
        assert!(merged.email_notifications.before_sending_invitations);
        assert!(!merged.email_notifications.event_dates);
    }

    #[test]
    fn test_empty_patch_detected() {
        let patch: UpdateNotificationPreferencesRequest =
            serde_json::from_value(json!({})).unwrap();
        assert!(patch.is_empty());

        let patch: UpdateNotificationPreferencesRequest =
            serde_json::from_value(json!({ "appNotifications": {} })).unwrap();
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(NotificationPreferences::default()).unwrap();
        assert_eq!(json["appNotifications"]["eventUpdates"], true);
        assert_eq!(json["emailNotifications"]["afterSendingInvitations"], false);
    }
}
