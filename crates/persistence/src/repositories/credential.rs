//! Password and reset-token writes shared by every account table.

use chrono::{DateTime, Utc};
use domain::models::AccountKind;
use sqlx::PgPool;
use uuid::Uuid;

use crate::metrics::QueryTimer;

fn table(kind: AccountKind) -> &'static str {
    match kind {
        AccountKind::Host => "hosts",
        AccountKind::Vendor => "vendors",
    }
}

/// Repository for credential columns on host and vendor rows.
#[derive(Clone)]
pub struct CredentialRepository {
    pool: PgPool,
}

impl CredentialRepository {
    /// Creates a new CredentialRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new password hash and clear any pending reset token.
    pub async fn set_password(
        &self,
        kind: AccountKind,
        id: Uuid,
        password_hash: &str,
        password_changed_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new(format!("set_{}_password", kind));
        let sql = format!(
            r#"
            UPDATE {}
            SET password_hash = $2,
                password_changed_at = $3,
                password_reset_token = NULL,
                password_reset_expires = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
            table(kind)
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(password_hash)
            .bind(password_changed_at)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Set or clear (`None`) the hashed reset token and its expiry.
    pub async fn set_reset_token(
        &self,
        kind: AccountKind,
        id: Uuid,
        hashed_token: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new(format!("set_{}_reset_token", kind));
        let sql = format!(
            r#"
            UPDATE {}
            SET password_reset_token = $2,
                password_reset_expires = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
            table(kind)
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(hashed_token)
            .bind(expires_at)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
