//! Phone verification codes.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::account::AccountKind;
use crate::errors::DomainError;

/// Default lifetime of a verification code.
pub const OTP_TTL_SECS: i64 = 300;

/// Why a code was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpPurpose {
    Login,
    Signup,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Login => "login",
            OtpPurpose::Signup => "signup",
        }
    }
}

impl FromStr for OtpPurpose {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(OtpPurpose::Login),
            "signup" => Ok(OtpPurpose::Signup),
            other => Err(DomainError::InvalidValue {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

/// Who the stored code belongs to: an existing account kind or a signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpUserType {
    Host,
    Vendor,
    Signup,
}

impl OtpUserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpUserType::Host => "host",
            OtpUserType::Vendor => "vendor",
            OtpUserType::Signup => "signup",
        }
    }

    /// The account kind to load after a successful login verification.
    pub fn account_kind(&self) -> Option<AccountKind> {
        match self {
            OtpUserType::Host => Some(AccountKind::Host),
            OtpUserType::Vendor => Some(AccountKind::Vendor),
            OtpUserType::Signup => None,
        }
    }
}

impl From<AccountKind> for OtpUserType {
    fn from(kind: AccountKind) -> Self {
        match kind {
            AccountKind::Host => OtpUserType::Host,
            AccountKind::Vendor => OtpUserType::Vendor,
        }
    }
}

impl FromStr for OtpUserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(OtpUserType::Host),
            "vendor" => Ok(OtpUserType::Vendor),
            "signup" => Ok(OtpUserType::Signup),
            other => Err(DomainError::InvalidValue {
                field: "user_type",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OtpUserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored verification code.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub id: Uuid,
    pub phone_number: String,
    pub otp_code: String,
    pub user_type: OtpUserType,
    pub user_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

pub fn otp_expiry(now: DateTime<Utc>, ttl_secs: i64) -> DateTime<Utc> {
    now + Duration::seconds(ttl_secs)
}

/// Text delivered by SMS.
pub fn otp_sms_message(code: &str) -> String {
    format!("Your OTP code is: {}. Valid for 5 minutes.", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_parsing() {
        assert_eq!("login".parse::<OtpPurpose>().unwrap(), OtpPurpose::Login);
        assert_eq!("signup".parse::<OtpPurpose>().unwrap(), OtpPurpose::Signup);
        assert!("register".parse::<OtpPurpose>().is_err());
        assert!("LOGIN".parse::<OtpPurpose>().is_err());
    }

    #[test]
    fn test_user_type_account_kind() {
        assert_eq!(OtpUserType::Host.account_kind(), Some(AccountKind::Host));
        assert_eq!(OtpUserType::Signup.account_kind(), None);
        assert_eq!(OtpUserType::from(AccountKind::Vendor), OtpUserType::Vendor);
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let record = OtpRecord {
            id: Uuid::new_v4(),
            phone_number: "0501234567".into(),
            otp_code: "123456".into(),
            user_type: OtpUserType::Signup,
            user_id: None,
            expires_at: otp_expiry(now, OTP_TTL_SECS),
            created_at: now,
        };
        assert!(!record.is_expired(now));
        assert!(!record.is_expired(now + Duration::seconds(299)));
        assert!(record.is_expired(now + Duration::seconds(300)));
    }

    #[test]
    fn test_sms_message() {
        assert_eq!(
            otp_sms_message("482913"),
            "Your OTP code is: 482913. Valid for 5 minutes."
        );
    }
}
