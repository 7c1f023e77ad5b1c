//! Guest domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::errors::DomainError;

/// RSVP and attendance state of a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GuestStatus {
    #[default]
    Invited,
    Confirmed,
    Declined,
    Attended,
    NoResponse,
}

impl GuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestStatus::Invited => "invited",
            GuestStatus::Confirmed => "confirmed",
            GuestStatus::Declined => "declined",
            GuestStatus::Attended => "attended",
            GuestStatus::NoResponse => "no-response",
        }
    }

    /// Statuses that count as an RSVP answer.
    pub fn is_rsvp_answer(&self) -> bool {
        matches!(self, GuestStatus::Confirmed | GuestStatus::Declined)
    }
}

impl FromStr for GuestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invited" => Ok(GuestStatus::Invited),
            "confirmed" => Ok(GuestStatus::Confirmed),
            "declined" => Ok(GuestStatus::Declined),
            "attended" => Ok(GuestStatus::Attended),
            "no-response" => Ok(GuestStatus::NoResponse),
            other => Err(DomainError::InvalidValue {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel an invitation went out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvitationMethod {
    #[default]
    Email,
    Sms,
    Whatsapp,
}

impl InvitationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationMethod::Email => "email",
            InvitationMethod::Sms => "sms",
            InvitationMethod::Whatsapp => "whatsapp",
        }
    }
}

impl FromStr for InvitationMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(InvitationMethod::Email),
            "sms" => Ok(InvitationMethod::Sms),
            "whatsapp" => Ok(InvitationMethod::Whatsapp),
            other => Err(DomainError::InvalidValue {
                field: "method",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub responded: bool,
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub checked_in: bool,
    pub checked_in_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
    pub method: Option<InvitationMethod>,
}

/// A person invited to one event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub event: Uuid,
    pub qrcode: Option<String>,
    pub status: GuestStatus,
    pub invited_by: Option<Uuid>,
    pub rsvp: Rsvp,
    pub check_in: CheckIn,
    pub invitation: Invitation,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Guest {
    /// Moves the guest to `status`, stamping the RSVP the first time the
    /// guest answers.
    pub fn set_status(&mut self, status: GuestStatus, now: DateTime<Utc>) {
        if status != self.status && status.is_rsvp_answer() && !self.rsvp.responded {
            self.rsvp.responded = true;
            self.rsvp.responded_at = Some(now);
        }
        self.status = status;
    }

    /// Marks the guest as arrived. Always ends in `attended`.
    pub fn perform_check_in(&mut self, now: DateTime<Utc>) {
        self.check_in.checked_in = true;
        self.check_in.checked_in_at = Some(now);
        self.status = GuestStatus::Attended;
    }

    pub fn send_invitation(&mut self, method: InvitationMethod, now: DateTime<Utc>) {
        self.invitation.sent = true;
        self.invitation.sent_at = Some(now);
        self.invitation.method = Some(method);
    }
}

/// QR payload assigned once when a guest row is created.
pub fn guest_qrcode(guest_id: Uuid, created_at: DateTime<Utc>) -> String {
    format!("guest_{}_{}", guest_id, created_at.timestamp_millis())
}

/// A guest as submitted in an event's guest list.
///
/// `id` is present when the client refers to a guest that already exists.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_guest_contact"))]
pub struct GuestInput {
    pub id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "Guest name is required and cannot exceed 100 characters"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_contact_phone"))]
    pub phone: Option<String>,

    #[validate(custom(function = "shared::validation::validate_contact_email"))]
    pub email: Option<String>,

    pub invited_by: Option<Uuid>,
}

impl GuestInput {
    /// Trims every field, lowercases the email, and turns blanks into `None`.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            id: self.id,
            name: self.name.trim().to_string(),
            phone: clean(self.phone),
            email: clean(self.email).map(|e| e.to_lowercase()),
            invited_by: self.invited_by,
        }
    }
}

fn validate_guest_contact(guest: &GuestInput) -> Result<(), ValidationError> {
    if guest.phone.is_none() && guest.email.is_none() {
        let mut err = ValidationError::new("contact");
        err.message = Some("Either phone number or email address is required".into());
        return Err(err);
    }
    Ok(())
}
