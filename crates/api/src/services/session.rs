//! Session issuing.
//!
//! A resolved account becomes a signed token, returned both in the body and
//! as the `jwt` cookie.

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use domain::models::Account;
use serde::Serialize;
use shared::session::{SessionClaims, SessionKeys, SessionTokenError};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::services::cookies::SessionCookies;

#[derive(Clone, Debug)]
pub struct SessionIssuer {
    keys: SessionKeys,
    cookies: SessionCookies,
}

impl SessionIssuer {
    pub fn new(keys: SessionKeys, cookies: SessionCookies) -> Self {
        Self { keys, cookies }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            SessionKeys::new(&config.secret, config.expires_in_secs),
            SessionCookies::from_config(config),
        )
    }

    pub fn cookies(&self) -> &SessionCookies {
        &self.cookies
    }

    pub fn issue(&self, account_id: Uuid) -> Result<String, ApiError> {
        self.keys
            .issue(account_id)
            .map_err(|e| ApiError::Internal(e.to_string()))
    }

    pub fn resolve(&self, token: &str) -> Result<SessionClaims, SessionTokenError> {
        self.keys.resolve(token)
    }

    /// Signs a token for `account` and sends the standard token envelope
    /// `{status, token, userType, data: {user}}` with the session cookie.
    pub fn token_response(&self, account: &Account, status: StatusCode) -> Result<Response, ApiError> {
        let token = self.issue(account.id())?;

        let mut headers = HeaderMap::new();
        self.cookies.append_session(&mut headers, &token);

        let body = TokenEnvelope {
            status: "success",
            token: &token,
            user_type: account.kind().as_str(),
            data: UserData { user: account },
        };

        Ok((status, headers, Json(body)).into_response())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenEnvelope<'a> {
    status: &'static str,
    token: &'a str,
    user_type: &'static str,
    data: UserData<'a>,
}

#[derive(Serialize)]
pub struct UserData<'a> {
    pub user: &'a Account,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::SET_COOKIE;
    use chrono::Utc;
    use domain::models::{AccountRole, Credentials, Host};

    fn issuer() -> SessionIssuer {
        SessionIssuer::new(
            SessionKeys::new("0123456789abcdef0123456789abcdef", 3600),
            SessionCookies::new(86_400, false),
        )
    }

    fn host() -> Account {
        let now = Utc::now();
        Account::Host(Host {
            id: Uuid::new_v4(),
            username: Some("noura".into()),
            email: Some("noura@example.com".into()),
            phone_number: "0509876543".into(),
            role: AccountRole::User,
            email_verified: false,
            profile_completed: true,
            credentials: Credentials::default(),
            created_at: now,
            updated_at: now,
        })
    }

    #[tokio::test]
    async fn test_token_response_shape() {
        let issuer = issuer();
        let account = host();
        let response = issuer.token_response(&account, StatusCode::CREATED).unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
        assert!(cookie.starts_with("jwt="));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["userType"], "host");
        assert_eq!(json["data"]["user"]["username"], "noura");

        let token = json["token"].as_str().unwrap();
        assert!(cookie.contains(token));
        assert_eq!(issuer.resolve(token).unwrap().id, account.id());
    }
}
