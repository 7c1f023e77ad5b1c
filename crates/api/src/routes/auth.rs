//! Authentication routes: signups, login, OTP and password flows.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use domain::models::vendor::{passwords_match, SignupVendorRequest};
use domain::models::white_label::SignupWhiteLabelRequest;
use domain::models::{Account, OtpPurpose};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentAccount, JsonBody, OptionalAccount, ValidatedJson};
use crate::routes::Success;
use crate::services::auth::{HostSignup, OtpOutcome};

/// Host signup. Phone only creates a provisional host; any profile field
/// requires the full set.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_host_signup"))]
pub struct SignupHostRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: Option<String>,

    #[validate(
        email(message = "Please provide a valid email"),
        custom(function = "shared::validation::validate_email_length")
    )]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_phone_length"))]
    pub phone_number: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    pub password_confirm: Option<String>,
}

fn validate_host_signup(req: &SignupHostRequest) -> Result<(), ValidationError> {
    if req.username.is_none() && req.email.is_none() && req.password.is_none() {
        return Ok(());
    }

    match (
        &req.username,
        &req.email,
        &req.password,
        &req.password_confirm,
    ) {
        (Some(_), Some(_), Some(password), Some(confirm)) => passwords_match(password, confirm),
        _ => {
            let mut err = ValidationError::new("incomplete_profile");
            err.message = Some(
                "Please provide username, email, password and passwordConfirm to complete your profile"
                    .into(),
            );
            Err(err)
        }
    }
}

impl From<SignupHostRequest> for HostSignup {
    fn from(req: SignupHostRequest) -> Self {
        HostSignup {
            username: req.username,
            email: req.email,
            phone_number: req.phone_number,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_complete_profile"))]
pub struct CompleteHostProfileRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[validate(
        email(message = "Please provide a valid email"),
        custom(function = "shared::validation::validate_email_length")
    )]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub password_confirm: String,
}

fn validate_complete_profile(req: &CompleteHostProfileRequest) -> Result<(), ValidationError> {
    passwords_match(&req.password, &req.password_confirm)
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub phone_number: Option<String>,
    #[serde(rename = "type")]
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub phone_number: Option<String>,
    pub otp_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_reset_password"))]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub password_confirm: String,
}

fn validate_reset_password(req: &ResetPasswordRequest) -> Result<(), ValidationError> {
    passwords_match(&req.password, &req.password_confirm)
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_password"))]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "Please provide your current password"))]
    pub password_current: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub password_confirm: String,
}

fn validate_update_password(req: &UpdatePasswordRequest) -> Result<(), ValidationError> {
    passwords_match(&req.password, &req.password_confirm)
}

#[derive(Debug, Serialize)]
pub struct OtpSentResponse {
    pub status: &'static str,
    pub message: &'static str,
    #[serde(rename = "type")]
    pub purpose: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneVerifiedResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub phone_number: String,
    pub verified: bool,
}

#[derive(Debug, Serialize)]
pub struct MeData {
    pub user: Option<Account>,
}

/// Trimmed value, `None` when absent or blank.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// OTP phones are stored and rate limited by value, so bound them first.
fn check_phone_length(phone_number: &str) -> Result<(), ApiError> {
    shared::validation::validate_phone_length(phone_number).map_err(|e| {
        ApiError::Validation(
            e.message
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Please provide a valid phone number".to_string()),
        )
    })
}

/// POST /api/auth/signup/host
pub async fn signup_host(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupHostRequest>,
) -> Result<Response, ApiError> {
    let account = state.auth_service().signup_host(request.into()).await?;
    state.sessions.token_response(&account, StatusCode::CREATED)
}

/// PATCH /api/auth/complete-host-profile
pub async fn complete_host_profile(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    ValidatedJson(request): ValidatedJson<CompleteHostProfileRequest>,
) -> Result<Response, ApiError> {
    let updated = state
        .auth_service()
        .complete_host_profile(
            &account,
            &request.username,
            &request.email,
            &request.password,
        )
        .await?;
    state.sessions.token_response(&updated, StatusCode::OK)
}

/// POST /api/auth/signup/vendor
pub async fn signup_vendor(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupVendorRequest>,
) -> Result<(StatusCode, Json<Success<()>>), ApiError> {
    state.auth_service().signup_vendor(&request).await?;
    Ok((
        StatusCode::CREATED,
        Json(Success::message("Vendor account created successfully")),
    ))
}

/// POST /api/auth/signup/whitelabel
pub async fn signup_white_label(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupWhiteLabelRequest>,
) -> Result<(StatusCode, Json<Success<()>>), ApiError> {
    state.auth_service().signup_white_label(&request).await?;
    Ok((
        StatusCode::CREATED,
        Json(Success::message("WhiteLabel account created successfully")),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Response, ApiError> {
    let (Some(email), Some(password)) = (present(request.email), request.password) else {
        return Err(ApiError::Validation(
            "Please provide email and password".to_string(),
        ));
    };
    if password.is_empty() {
        return Err(ApiError::Validation(
            "Please provide email and password".to_string(),
        ));
    }

    let account = state.auth_service().login(&email, &password).await?;
    state.sessions.token_response(&account, StatusCode::OK)
}

/// POST /api/auth/send-otp
pub async fn send_otp(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SendOtpRequest>,
) -> Result<Json<OtpSentResponse>, ApiError> {
    let phone_number = present(request.phone_number)
        .ok_or_else(|| ApiError::Validation("Please provide phone number".to_string()))?;
    check_phone_length(&phone_number)?;
    let purpose: OtpPurpose = request
        .purpose
        .as_deref()
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| {
            ApiError::Validation("Please provide valid purpose (login or signup)".to_string())
        })?;

    state.auth_service().send_otp(&phone_number, purpose).await?;

    Ok(Json(OtpSentResponse {
        status: "success",
        message: "OTP sent successfully to your phone number",
        purpose: purpose.as_str(),
    }))
}

/// POST /api/auth/verify-otp
pub async fn verify_otp(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<VerifyOtpRequest>,
) -> Result<Response, ApiError> {
    let (Some(phone_number), Some(otp_code)) =
        (present(request.phone_number), present(request.otp_code))
    else {
        return Err(ApiError::Validation(
            "Please provide phone number and OTP code".to_string(),
        ));
    };
    check_phone_length(&phone_number)?;

    if let Some(limiter) = &state.otp_limiter {
        limiter.check(&phone_number).map_err(|wait| {
            tracing::warn!(retry_after = wait, "OTP verification rate limited");
            ApiError::RateLimited(wait)
        })?;
    }

    match state
        .auth_service()
        .verify_otp(&phone_number, &otp_code)
        .await?
    {
        OtpOutcome::PhoneVerified => Ok(Json(PhoneVerifiedResponse {
            status: "success",
            message: "Phone number verified successfully",
            phone_number,
            verified: true,
        })
        .into_response()),
        OtpOutcome::LoggedIn(account) => state.sessions.token_response(&account, StatusCode::OK),
    }
}

/// GET /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> (HeaderMap, Json<Success<()>>) {
    let mut headers = HeaderMap::new();
    state.sessions.cookies().append_logout(&mut headers);
    (headers, Json(Success::empty()))
}

/// GET /api/auth/me
pub async fn me(OptionalAccount(account): OptionalAccount) -> Json<Success<MeData>> {
    Json(Success::data(MeData { user: account }))
}

/// POST /api/auth/forgotPassword
pub async fn forgot_password(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ForgotPasswordRequest>,
) -> Result<Json<Success<()>>, ApiError> {
    let email = present(request.email)
        .ok_or_else(|| ApiError::Validation("Please provide your email address".to_string()))?;

    state.auth_service().forgot_password(&email).await?;
    Ok(Json(Success::message("Token sent to email!")))
}

/// PATCH /api/auth/resetPassword/:token
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> Result<Response, ApiError> {
    let account = state
        .auth_service()
        .reset_password(&token, &request.password)
        .await?;
    state.sessions.token_response(&account, StatusCode::OK)
}

/// PATCH /api/auth/updateMyPassword
pub async fn update_password(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    ValidatedJson(request): ValidatedJson<UpdatePasswordRequest>,
) -> Result<Response, ApiError> {
    let updated = state
        .auth_service()
        .update_password(&account, &request.password_current, &request.password)
        .await?;
    state.sessions.token_response(&updated, StatusCode::OK)
}
