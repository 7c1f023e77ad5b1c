//! Vendor repository for database operations.

use domain::models::VendorProfile;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::VendorEntity;
use crate::metrics::QueryTimer;

/// Repository for vendor accounts.
#[derive(Clone)]
pub struct VendorRepository {
    pool: PgPool,
}

impl VendorRepository {
    /// Creates a new VendorRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<VendorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_vendor_by_id");
        let result = sqlx::query_as::<_, VendorEntity>(
            r#"
            SELECT id, email, phone_number, role, profile, password_hash, password_changed_at,
                   password_reset_token, password_reset_expires, created_at, updated_at
            FROM vendors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<VendorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_vendor_by_email");
        let result = sqlx::query_as::<_, VendorEntity>(
            r#"
            SELECT id, email, phone_number, role, profile, password_hash, password_changed_at,
                   password_reset_token, password_reset_expires, created_at, updated_at
            FROM vendors
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<VendorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_vendor_by_phone");
        let result = sqlx::query_as::<_, VendorEntity>(
            r#"
            SELECT id, email, phone_number, role, profile, password_hash, password_changed_at,
                   password_reset_token, password_reset_expires, created_at, updated_at
            FROM vendors
            WHERE phone_number = $1
            "#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a vendor holding an unexpired reset token with the given hash.
    pub async fn find_by_reset_token(
        &self,
        hashed_token: &str,
    ) -> Result<Option<VendorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_vendor_by_reset_token");
        let result = sqlx::query_as::<_, VendorEntity>(
            r#"
            SELECT id, email, phone_number, role, profile, password_hash, password_changed_at,
                   password_reset_token, password_reset_expires, created_at, updated_at
            FROM vendors
            WHERE password_reset_token = $1 AND password_reset_expires > NOW()
            "#,
        )
        .bind(hashed_token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn email_or_phone_taken(
        &self,
        email: &str,
        phone_number: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("vendor_email_or_phone_taken");
        let result: Result<(bool,), sqlx::Error> = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM vendors WHERE email = $1 OR phone_number = $2)",
        )
        .bind(email)
        .bind(phone_number)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.0)
    }

    pub async fn create(
        &self,
        email: &str,
        phone_number: &str,
        profile: &VendorProfile,
        password_hash: &str,
    ) -> Result<VendorEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_vendor");
        let result = sqlx::query_as::<_, VendorEntity>(
            r#"
            INSERT INTO vendors (email, phone_number, profile, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, phone_number, role, profile, password_hash, password_changed_at,
                      password_reset_token, password_reset_expires, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(phone_number)
        .bind(Json(profile))
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
