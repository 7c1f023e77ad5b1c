//! Session guards.
//!
//! - [`protect`]: requires a valid session (Bearer header or `jwt` cookie)
//! - [`is_logged_in`]: resolves the `jwt` cookie when present, never rejects
//! - [`require_admin`]: runs after `protect`, admits the admin role only
//!
//! A resolved account is stored in the request extensions as
//! [`CurrentAccount`].

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use domain::models::{Account, AccountRole};

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::cookies::session_cookie_value;

pub const NOT_LOGGED_IN: &str = "You are not logged in! Please log in to get access.";
pub const ACCOUNT_GONE: &str = "The user belonging to this token no longer exists.";
pub const PASSWORD_CHANGED: &str = "User recently changed password! Please log in again.";
pub const INVALID_TOKEN: &str = "Invalid token. Please log in again!";
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action";

/// The account behind the current request's session.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

/// Bearer token first, then the `jwt` cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| session_cookie_value(headers))
}

/// Why a token did not yield an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Invalid,
    AccountGone,
    PasswordChanged,
}

impl Rejection {
    fn message(self) -> &'static str {
        match self {
            Rejection::Invalid => INVALID_TOKEN,
            Rejection::AccountGone => ACCOUNT_GONE,
            Rejection::PasswordChanged => PASSWORD_CHANGED,
        }
    }
}

async fn resolve_session(state: &AppState, token: &str) -> Result<Result<Account, Rejection>, ApiError> {
    let Ok(claims) = state.sessions.resolve(token) else {
        return Ok(Err(Rejection::Invalid));
    };

    let Some(account) = state.identity().find_by_id(claims.id).await? else {
        return Ok(Err(Rejection::AccountGone));
    };

    if account.credentials().changed_password_after(claims.iat) {
        return Ok(Err(Rejection::PasswordChanged));
    }

    Ok(Ok(account))
}

pub async fn protect(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(req.headers())
        .ok_or_else(|| ApiError::Unauthorized(NOT_LOGGED_IN.to_string()))?;

    let account = resolve_session(&state, &token).await?.map_err(|rejection| {
        tracing::debug!(reason = ?rejection, "Session rejected");
        ApiError::Unauthorized(rejection.message().to_string())
    })?;

    req.extensions_mut().insert(CurrentAccount(account));
    Ok(next.run(req).await)
}

/// Cookie-only soft gate. Any failure, including a database error, leaves
/// the request anonymous.
pub async fn is_logged_in(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = session_cookie_value(req.headers()) {
        match resolve_session(&state, &token).await {
            Ok(Ok(account)) => {
                req.extensions_mut().insert(CurrentAccount(account));
            }
            Ok(Err(_)) => {}
            Err(e) => tracing::warn!(error = %e, "Session lookup failed in soft gate"),
        }
    }

    next.run(req).await
}

/// Ok when the account holds one of `roles`.
pub fn restrict_to(account: &Account, roles: &[AccountRole]) -> Result<(), ApiError> {
    if roles.contains(&account.role()) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(PERMISSION_DENIED.to_string()))
    }
}

pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let account = req
        .extensions()
        .get::<CurrentAccount>()
        .ok_or_else(|| ApiError::Unauthorized(NOT_LOGGED_IN.to_string()))?;

    restrict_to(&account.0, &[AccountRole::Admin])?;
    Ok(next.run(req).await)
}
