//! Account onboarding, login and credential flows.
//!
//! Hosts and vendors share login, OTP and password flows. White-label
//! partners only register.

use chrono::Utc;
use domain::models::account::{password_changed_stamp, reset_token_expiry};
use domain::models::otp::otp_sms_message;
use domain::models::vendor::SignupVendorRequest;
use domain::models::white_label::SignupWhiteLabelRequest;
use domain::models::{Account, OtpPurpose, OtpUserType, Vendor, WhiteLabel};
use persistence::repositories::{
    CredentialRepository, HostRepository, NewHost, NewWhiteLabel, VendorRepository,
    WhiteLabelRepository,
};
use shared::crypto::{generate_reset_token, sha256_hex};
use shared::password::{hash_password, verify_password, PasswordError};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::metrics::{record_otp_issued, record_otp_verified};
use crate::services::email::{password_reset_message, EmailSender};
use crate::services::identity::IdentityResolver;
use crate::services::otp::OtpLedger;
use crate::services::sms::SmsSender;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Host with this email, username, or phone number already exists")]
    HostExists,

    #[error("Vendor with this email, or phone number already exists")]
    VendorExists,

    #[error("WhiteLabel with this email, or phone number already exists")]
    WhiteLabelExists,

    #[error("Only host accounts can complete a profile")]
    NotAHost,

    #[error("Your profile is already completed")]
    ProfileAlreadyCompleted,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("No account found with this phone number")]
    NoAccountForPhone,

    #[error("Phone number already registered. Please use login instead.")]
    PhoneAlreadyRegistered,

    #[error("Invalid or expired OTP")]
    InvalidOtp,

    #[error("User not found")]
    AccountNotFound,

    #[error("There is no user with email address.")]
    NoUserWithEmail,

    #[error("Token is invalid or has expired")]
    InvalidResetToken,

    #[error("Your current password is wrong.")]
    WrongCurrentPassword,

    #[error("There was an error sending the email. Try again later!")]
    EmailDelivery,

    #[error("There was an error sending the verification code. Try again later!")]
    SmsDelivery,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::HostExists
            | AuthError::VendorExists
            | AuthError::WhiteLabelExists
            | AuthError::PhoneAlreadyRegistered => ApiError::Conflict(message),
            AuthError::ProfileAlreadyCompleted
            | AuthError::InvalidOtp
            | AuthError::InvalidResetToken => ApiError::Validation(message),
            AuthError::InvalidCredentials | AuthError::WrongCurrentPassword => {
                ApiError::Unauthorized(message)
            }
            AuthError::NotAHost => ApiError::Forbidden(message),
            AuthError::NoAccountForPhone
            | AuthError::AccountNotFound
            | AuthError::NoUserWithEmail => ApiError::NotFound(message),
            AuthError::EmailDelivery | AuthError::SmsDelivery => ApiError::Dependency(message),
            AuthError::Password(e) => ApiError::from(e),
            AuthError::Database(e) => ApiError::from(e),
        }
    }
}

/// Unique index hit by a concurrent insert.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Host signup fields after validation. Either all of username, email and
/// password are present or none of them.
#[derive(Debug, Clone)]
pub struct HostSignup {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_number: String,
    pub password: Option<String>,
}

/// Result of a successful OTP verification.
#[derive(Debug)]
pub enum OtpOutcome {
    /// Signup code: the phone number is proven, no account yet.
    PhoneVerified,
    /// Login code: the account the code was issued for.
    LoggedIn(Account),
}

#[derive(Clone)]
pub struct AuthService {
    hosts: HostRepository,
    vendors: VendorRepository,
    white_labels: WhiteLabelRepository,
    credentials: CredentialRepository,
    identity: IdentityResolver,
    otps: OtpLedger,
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
    frontend_url: String,
}

impl AuthService {
    pub fn new(
        pool: sqlx::PgPool,
        otps: OtpLedger,
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsSender>,
        frontend_url: String,
    ) -> Self {
        Self {
            hosts: HostRepository::new(pool.clone()),
            vendors: VendorRepository::new(pool.clone()),
            white_labels: WhiteLabelRepository::new(pool.clone()),
            credentials: CredentialRepository::new(pool.clone()),
            identity: IdentityResolver::new(pool),
            otps,
            email,
            sms,
            frontend_url,
        }
    }

    pub async fn signup_host(&self, signup: HostSignup) -> Result<Account, AuthError> {
        let email = signup.email.map(|e| e.trim().to_lowercase());
        let username = signup.username.map(|u| u.trim().to_string());
        let phone_number = signup.phone_number.trim().to_string();

        if self
            .hosts
            .identifiers_taken(
                email.as_deref(),
                username.as_deref(),
                Some(&phone_number),
                None,
            )
            .await?
        {
            return Err(AuthError::HostExists);
        }

        let password_hash = signup.password.as_deref().map(hash_password).transpose()?;

        let created = self
            .hosts
            .create(NewHost {
                username: username.as_deref(),
                email: email.as_deref(),
                phone_number: &phone_number,
                password_hash: password_hash.as_deref(),
                profile_completed: password_hash.is_some(),
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::HostExists
                } else {
                    AuthError::Database(e)
                }
            })?;

        tracing::info!(
            host_id = %created.id,
            profile_completed = created.profile_completed,
            "Host signed up"
        );
        Ok(Account::Host(created.into()))
    }

    /// Turns a phone-only host into a full account.
    pub async fn complete_host_profile(
        &self,
        account: &Account,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        let host = account.as_host().ok_or(AuthError::NotAHost)?;
        if host.profile_completed {
            return Err(AuthError::ProfileAlreadyCompleted);
        }

        let username = username.trim();
        let email = email.trim().to_lowercase();

        if self
            .hosts
            .identifiers_taken(Some(&email), Some(username), None, Some(host.id))
            .await?
        {
            return Err(AuthError::HostExists);
        }

        let password_hash = hash_password(password)?;
        // Replacing an existing password invalidates older tokens.
        let changed_at = host
            .credentials
            .has_password()
            .then(|| password_changed_stamp(Utc::now()));

        let updated = self
            .hosts
            .complete_profile(host.id, username, &email, &password_hash, changed_at)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::HostExists
                } else {
                    AuthError::Database(e)
                }
            })?;

        tracing::info!(host_id = %updated.id, "Host profile completed");
        Ok(Account::Host(updated.into()))
    }

    pub async fn signup_vendor(&self, request: &SignupVendorRequest) -> Result<Vendor, AuthError> {
        let email = request.email();
        let phone_number = request.phone_number();

        if self.vendors.email_or_phone_taken(&email, &phone_number).await? {
            return Err(AuthError::VendorExists);
        }

        let mut profile = request.profile.clone();
        profile.identity.email = email.clone();
        profile.identity.phone_number = phone_number.clone();

        let password_hash = hash_password(&request.password)?;
        let created = self
            .vendors
            .create(&email, &phone_number, &profile, &password_hash)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::VendorExists
                } else {
                    AuthError::Database(e)
                }
            })?;

        tracing::info!(vendor_id = %created.id, "Vendor signed up");
        Ok(created.into())
    }

    pub async fn signup_white_label(
        &self,
        request: &SignupWhiteLabelRequest,
    ) -> Result<WhiteLabel, AuthError> {
        let email = request.email.trim().to_lowercase();
        let phone_number = request.phone_number.trim();
        let username = request.username.trim();

        if self
            .white_labels
            .identifiers_taken(&email, phone_number, username)
            .await?
        {
            return Err(AuthError::WhiteLabelExists);
        }

        let password_hash = hash_password(&request.password)?;
        let created = self
            .white_labels
            .create(NewWhiteLabel {
                username,
                email: &email,
                phone_number,
                password_hash: &password_hash,
                identity: &request.identity,
                login_data: &request.login_data,
                system_requirements: &request.system_requirements,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::WhiteLabelExists
                } else {
                    AuthError::Database(e)
                }
            })?;

        tracing::info!(white_label_id = %created.id, "White-label partner signed up");
        Ok(created.into())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let account = self
            .identity
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Phone-only hosts have no password to check against.
        let stored = account
            .credentials()
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, stored)? {
            tracing::debug!(account_id = %account.id(), "Password mismatch on login");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(account)
    }

    pub async fn send_otp(&self, phone_number: &str, purpose: OtpPurpose) -> Result<(), AuthError> {
        let existing = self.identity.find_by_phone(phone_number).await?;

        let (user_type, user_id) = match purpose {
            OtpPurpose::Login => {
                let account = existing.ok_or(AuthError::NoAccountForPhone)?;
                (OtpUserType::from(account.kind()), Some(account.id()))
            }
            OtpPurpose::Signup => {
                if existing.is_some() {
                    return Err(AuthError::PhoneAlreadyRegistered);
                }
                (OtpUserType::Signup, None)
            }
        };

        let issued = self.otps.issue(phone_number, user_type, user_id).await?;

        if let Err(e) = self
            .sms
            .send(phone_number, &otp_sms_message(&issued.code))
            .await
        {
            tracing::error!(error = %e, "Failed to deliver OTP");
            if let Err(cleanup) = self.otps.revoke(issued.id).await {
                tracing::error!(error = %cleanup, "Failed to remove undelivered OTP");
            }
            return Err(AuthError::SmsDelivery);
        }

        record_otp_issued(purpose.as_str());
        tracing::info!(user_type = %user_type, "OTP issued");
        Ok(())
    }

    pub async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<OtpOutcome, AuthError> {
        let record = self
            .otps
            .verify(phone_number, code)
            .await?
            .ok_or(AuthError::InvalidOtp)?;

        record_otp_verified(record.user_type.as_str());

        let Some(kind) = record.user_type.account_kind() else {
            return Ok(OtpOutcome::PhoneVerified);
        };

        let user_id = record.user_id.ok_or(AuthError::AccountNotFound)?;
        let account = self
            .identity
            .find_by_kind(kind, user_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        Ok(OtpOutcome::LoggedIn(account))
    }

    /// Stores a reset token digest and mails the plaintext. The token is
    /// cleared again when the mail cannot be sent.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let account = self
            .identity
            .find_by_email(email)
            .await?
            .ok_or(AuthError::NoUserWithEmail)?;

        let token = generate_reset_token();
        self.credentials
            .set_reset_token(
                account.kind(),
                account.id(),
                Some(&token.hashed),
                Some(reset_token_expiry(Utc::now())),
            )
            .await?;

        let recipient = account.email().unwrap_or(email).to_string();
        let message = password_reset_message(&recipient, &self.frontend_url, &token.plaintext);

        if let Err(e) = self.email.send(message).await {
            tracing::error!(account_id = %account.id(), error = %e, "Failed to send reset email");
            if let Err(cleanup) = self
                .credentials
                .set_reset_token(account.kind(), account.id(), None, None)
                .await
            {
                tracing::error!(error = %cleanup, "Failed to clear reset token");
            }
            return Err(AuthError::EmailDelivery);
        }

        tracing::info!(account_id = %account.id(), kind = %account.kind(), "Password reset token sent");
        Ok(())
    }

    pub async fn reset_password(&self, plaintext: &str, password: &str) -> Result<Account, AuthError> {
        let account = self
            .identity
            .find_by_reset_token(&sha256_hex(plaintext))
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        self.store_new_password(&account, password).await?;
        tracing::info!(account_id = %account.id(), "Password reset");
        self.reload(&account).await
    }

    pub async fn update_password(
        &self,
        account: &Account,
        current: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        let fresh = self.reload(account).await?;
        let stored = fresh
            .credentials()
            .password_hash
            .as_deref()
            .ok_or(AuthError::WrongCurrentPassword)?;

        if !verify_password(current, stored)? {
            return Err(AuthError::WrongCurrentPassword);
        }

        self.store_new_password(&fresh, password).await?;
        tracing::info!(account_id = %fresh.id(), "Password updated");
        self.reload(&fresh).await
    }

    async fn store_new_password(&self, account: &Account, password: &str) -> Result<(), AuthError> {
        let password_hash = hash_password(password)?;
        let updated = self
            .credentials
            .set_password(
                account.kind(),
                account.id(),
                &password_hash,
                password_changed_stamp(Utc::now()),
            )
            .await?;
        if !updated {
            return Err(AuthError::AccountNotFound);
        }
        Ok(())
    }

    async fn reload(&self, account: &Account) -> Result<Account, AuthError> {
        self.find_account(account.kind(), account.id()).await
    }

    async fn find_account(
        &self,
        kind: domain::models::AccountKind,
        id: Uuid,
    ) -> Result<Account, AuthError> {
        self.identity
            .find_by_kind(kind, id)
            .await?
            .ok_or(AuthError::AccountNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status(err: AuthError) -> StatusCode {
        ApiError::from(err).status_code()
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(status(AuthError::HostExists), StatusCode::BAD_REQUEST);
        assert_eq!(status(AuthError::PhoneAlreadyRegistered), StatusCode::BAD_REQUEST);
        assert_eq!(status(AuthError::InvalidOtp), StatusCode::BAD_REQUEST);
        assert_eq!(status(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(status(AuthError::WrongCurrentPassword), StatusCode::UNAUTHORIZED);
        assert_eq!(status(AuthError::NoAccountForPhone), StatusCode::NOT_FOUND);
        assert_eq!(status(AuthError::NoUserWithEmail), StatusCode::NOT_FOUND);
        assert_eq!(status(AuthError::NotAHost), StatusCode::FORBIDDEN);
        assert_eq!(status(AuthError::SmsDelivery), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_messages_pass_through() {
        match ApiError::from(AuthError::EmailDelivery) {
            ApiError::Dependency(msg) => {
                assert_eq!(msg, "There was an error sending the email. Try again later!")
            }
            other => panic!("unexpected {:?}", other),
        }
        match ApiError::from(AuthError::VendorExists) {
            ApiError::Conflict(msg) => {
                assert_eq!(msg, "Vendor with this email, or phone number already exists")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_row_not_found_is_not_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
