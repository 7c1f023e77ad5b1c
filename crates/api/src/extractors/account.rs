//! Session account extractors.
//!
//! Both read what the session guards left in the request extensions; they
//! never touch the token themselves.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::Account;

use crate::error::ApiError;
use crate::middleware::auth::NOT_LOGGED_IN;

pub use crate::middleware::auth::CurrentAccount;

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAccount>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized(NOT_LOGGED_IN.to_string()))
    }
}

/// The session account when the soft gate found one.
#[derive(Debug, Clone)]
pub struct OptionalAccount(pub Option<Account>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAccount
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAccount(
            parts.extensions.get::<CurrentAccount>().map(|c| c.0.clone()),
        ))
    }
}
