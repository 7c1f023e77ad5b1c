//! White-label repository for database operations.

use domain::models::white_label::{BrandIdentity, LoginData, SystemRequirements};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::entities::WhiteLabelEntity;
use crate::metrics::QueryTimer;

/// Input for inserting a white-label partner.
#[derive(Debug, Clone)]
pub struct NewWhiteLabel<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub password_hash: &'a str,
    pub identity: &'a BrandIdentity,
    pub login_data: &'a LoginData,
    pub system_requirements: &'a SystemRequirements,
}

/// Repository for white-label partners.
#[derive(Clone)]
pub struct WhiteLabelRepository {
    pool: PgPool,
}

impl WhiteLabelRepository {
    /// Creates a new WhiteLabelRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn identifiers_taken(
        &self,
        email: &str,
        phone_number: &str,
        username: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("white_label_identifiers_taken");
        let result: Result<(bool,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM white_labels
                WHERE email = $1 OR phone_number = $2 OR username = $3
            )
            "#,
        )
        .bind(email)
        .bind(phone_number)
        .bind(username)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.0)
    }

    pub async fn create(&self, partner: NewWhiteLabel<'_>) -> Result<WhiteLabelEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_white_label");
        let result = sqlx::query_as::<_, WhiteLabelEntity>(
            r#"
            INSERT INTO white_labels
                (username, email, phone_number, password_hash, identity, login_data, system_requirements)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, email, phone_number, identity, login_data, system_requirements,
                      created_at
            "#,
        )
        .bind(partner.username)
        .bind(partner.email)
        .bind(partner.phone_number)
        .bind(partner.password_hash)
        .bind(Json(partner.identity))
        .bind(Json(partner.login_data))
        .bind(Json(partner.system_requirements))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
