//! Account domain models.
//!
//! Hosts and vendors live in separate tables and are unified here as a tagged
//! variant. Whenever both kinds could match, hosts are consulted first.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::vendor::VendorProfile;
use crate::errors::DomainError;

/// Minutes a password-reset token stays usable.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 10;

/// Which table an account lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Host,
    Vendor,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Host => "host",
            AccountKind::Vendor => "vendor",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    #[default]
    User,
    Admin,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::User => "user",
            AccountRole::Admin => "admin",
        }
    }
}

impl FromStr for AccountRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(AccountRole::User),
            "admin" => Ok(AccountRole::Admin),
            other => Err(DomainError::InvalidValue {
                field: "role",
                value: other.to_string(),
            }),
        }
    }
}

/// Password material kept alongside an account. Never serialized.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub password_hash: Option<String>,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<DateTime<Utc>>,
}

impl Credentials {
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// True when the password changed after a token issued at `issued_at`
    /// (unix seconds) was signed.
    pub fn changed_password_after(&self, issued_at: i64) -> bool {
        match self.password_changed_at {
            Some(changed_at) => issued_at < changed_at.timestamp(),
            None => false,
        }
    }
}

/// Timestamp recorded when a password is changed.
///
/// Backdated by one second so a token minted in the same second as the change
/// is still accepted by `changed_password_after`.
pub fn password_changed_stamp(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::seconds(1)
}

/// Expiry for a reset token issued at `now`.
pub fn reset_token_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::minutes(RESET_TOKEN_TTL_MINUTES)
}

/// Primary tenant account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_number: String,
    pub role: AccountRole,
    pub email_verified: bool,
    pub profile_completed: bool,
    #[serde(skip)]
    pub credentials: Credentials,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Service-provider account with its onboarding profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: Uuid,
    pub email: String,
    pub phone_number: String,
    pub role: AccountRole,
    #[serde(flatten)]
    pub profile: VendorProfile,
    #[serde(skip)]
    pub credentials: Credentials,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A resolved identity: either a host or a vendor.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Account {
    Host(Host),
    Vendor(Vendor),
}

impl Account {
    pub fn id(&self) -> Uuid {
        match self {
            Account::Host(h) => h.id,
            Account::Vendor(v) => v.id,
        }
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Account::Host(_) => AccountKind::Host,
            Account::Vendor(_) => AccountKind::Vendor,
        }
    }

    pub fn role(&self) -> AccountRole {
        match self {
            Account::Host(h) => h.role,
            Account::Vendor(v) => v.role,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Account::Host(h) => h.email.as_deref(),
            Account::Vendor(v) => Some(v.email.as_str()),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        match self {
            Account::Host(h) => &h.credentials,
            Account::Vendor(v) => &v.credentials,
        }
    }

    pub fn as_host(&self) -> Option<&Host> {
        match self {
            Account::Host(h) => Some(h),
            Account::Vendor(_) => None,
        }
    }
}
