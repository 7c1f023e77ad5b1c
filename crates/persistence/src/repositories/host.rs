//! Host repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::HostEntity;
use crate::metrics::QueryTimer;

/// Input for inserting a host row.
#[derive(Debug, Clone)]
pub struct NewHost<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone_number: &'a str,
    pub password_hash: Option<&'a str>,
    pub profile_completed: bool,
}

/// Repository for host accounts.
#[derive(Clone)]
pub struct HostRepository {
    pool: PgPool,
}

impl HostRepository {
    /// Creates a new HostRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<HostEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_host_by_id");
        let result = sqlx::query_as::<_, HostEntity>(
            r#"
            SELECT id, username, email, phone_number, role, email_verified, profile_completed,
                   password_hash, password_changed_at, password_reset_token, password_reset_expires,
                   created_at, updated_at
            FROM hosts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a host by (lowercased) email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<HostEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_host_by_email");
        let result = sqlx::query_as::<_, HostEntity>(
            r#"
            SELECT id, username, email, phone_number, role, email_verified, profile_completed,
                   password_hash, password_changed_at, password_reset_token, password_reset_expires,
                   created_at, updated_at
            FROM hosts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_phone(&self, phone_number: &str) -> Result<Option<HostEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_host_by_phone");
        let result = sqlx::query_as::<_, HostEntity>(
            r#"
            SELECT id, username, email, phone_number, role, email_verified, profile_completed,
                   password_hash, password_changed_at, password_reset_token, password_reset_expires,
                   created_at, updated_at
            FROM hosts
            WHERE phone_number = $1
            "#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a host holding an unexpired reset token with the given hash.
    pub async fn find_by_reset_token(
        &self,
        hashed_token: &str,
    ) -> Result<Option<HostEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_host_by_reset_token");
        let result = sqlx::query_as::<_, HostEntity>(
            r#"
            SELECT id, username, email, phone_number, role, email_verified, profile_completed,
                   password_hash, password_changed_at, password_reset_token, password_reset_expires,
                   created_at, updated_at
            FROM hosts
            WHERE password_reset_token = $1 AND password_reset_expires > NOW()
            "#,
        )
        .bind(hashed_token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// True if another host already uses any of the given identifiers.
    ///
    /// `exclude` skips one host id, for profile completion.
    pub async fn identifiers_taken(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        phone_number: Option<&str>,
        exclude: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("host_identifiers_taken");
        let result: Result<(bool,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM hosts
                WHERE (email = $1 OR username = $2 OR phone_number = $3)
                  AND ($4::uuid IS NULL OR id <> $4)
            )
            "#,
        )
        .bind(email)
        .bind(username)
        .bind(phone_number)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.0)
    }

    pub async fn create(&self, host: NewHost<'_>) -> Result<HostEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_host");
        let result = sqlx::query_as::<_, HostEntity>(
            r#"
            INSERT INTO hosts (username, email, phone_number, password_hash, profile_completed)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, phone_number, role, email_verified, profile_completed,
                      password_hash, password_changed_at, password_reset_token, password_reset_expires,
                      created_at, updated_at
            "#,
        )
        .bind(host.username)
        .bind(host.email)
        .bind(host.phone_number)
        .bind(host.password_hash)
        .bind(host.profile_completed)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fill in the identity of a phone-only host and mark the profile complete.
    ///
    /// `password_changed_at` is only set when a password already existed.
    pub async fn complete_profile(
        &self,
        id: Uuid,
        username: &str,
        email: &str,
        password_hash: &str,
        password_changed_at: Option<DateTime<Utc>>,
    ) -> Result<HostEntity, sqlx::Error> {
        let timer = QueryTimer::new("complete_host_profile");
        let result = sqlx::query_as::<_, HostEntity>(
            r#"
            UPDATE hosts
            SET username = $2,
                email = $3,
                password_hash = $4,
                password_changed_at = COALESCE($5, password_changed_at),
                profile_completed = true,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, phone_number, role, email_verified, profile_completed,
                      password_hash, password_changed_at, password_reset_token, password_reset_expires,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(password_changed_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
