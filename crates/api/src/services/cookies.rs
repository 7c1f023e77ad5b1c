//! Session cookie handling.
//!
//! The session token travels in an HttpOnly cookie named `jwt` alongside the
//! `token` response field. Logging out overwrites it with a short-lived
//! placeholder that never resolves.

use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};
use axum_extra::headers::{Cookie, HeaderMapExt};

use crate::config::JwtConfig;

pub const SESSION_COOKIE_NAME: &str = "jwt";
pub const LOGGED_OUT_VALUE: &str = "loggedout";
const LOGGED_OUT_MAX_AGE_SECS: i64 = 10;

#[derive(Debug, Clone)]
pub struct SessionCookies {
    max_age_secs: i64,
    secure: bool,
}

impl SessionCookies {
    pub fn new(max_age_secs: i64, secure: bool) -> Self {
        Self {
            max_age_secs,
            secure,
        }
    }

    /// Cookie lifetime comes from `cookie_expires_in_days`, not the token lifetime.
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.cookie_expires_in_days * 24 * 60 * 60, config.secure_cookies)
    }

    pub fn session_cookie(&self, token: &str) -> String {
        self.build(token, self.max_age_secs)
    }

    pub fn logout_cookie(&self) -> String {
        self.build(LOGGED_OUT_VALUE, LOGGED_OUT_MAX_AGE_SECS)
    }

    pub fn append_session(&self, headers: &mut HeaderMap, token: &str) {
        append(headers, &self.session_cookie(token));
    }

    pub fn append_logout(&self, headers: &mut HeaderMap) {
        append(headers, &self.logout_cookie());
    }

    fn build(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly",
            SESSION_COOKIE_NAME, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

fn append(headers: &mut HeaderMap, cookie: &str) {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        headers.append(SET_COOKIE, value);
    }
}

/// The `jwt` cookie of a request, if any.
pub fn session_cookie_value(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Cookie>()
        .and_then(|cookie| cookie.get(SESSION_COOKIE_NAME).map(str::to_string))
        .filter(|value| !value.is_empty())
}
