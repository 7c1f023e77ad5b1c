//! White-label partner registration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::vendor::passwords_match;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BrandIdentity {
    #[validate(length(min = 2, max = 50, message = "Arabic name must be between 2 and 50 characters"))]
    pub arabic_name: String,

    #[validate(length(min = 2, max = 50, message = "English name must be between 2 and 50 characters"))]
    pub english_name: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub logo: String,

    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub primary_color: String,

    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub secondary_color: String,

    pub font_family: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    #[validate(email(message = "Please provide a valid login email"))]
    pub email: String,

    #[validate(length(min = 3, message = "Please provide a valid domain"))]
    pub domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SystemRequirements {
    #[validate(custom(function = "shared::validation::validate_positive_integer"))]
    pub number_of_events: String,

    #[validate(custom(function = "shared::validation::validate_positive_integer"))]
    pub number_of_guests_per_event: String,

    #[validate(custom(function = "shared::validation::validate_non_empty_list"))]
    pub events_types: Vec<String>,

    #[serde(default)]
    pub services: Vec<String>,
}

/// A registered partner. Registration-only; partners never sign in here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteLabel {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub identity: BrandIdentity,
    pub login_data: LoginData,
    pub system_requirements: SystemRequirements,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_white_label_passwords"))]
pub struct SignupWhiteLabelRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[validate(
        email(message = "Please provide a valid email"),
        custom(function = "shared::validation::validate_email_length")
    )]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_phone_length"))]
    pub phone_number: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub password_confirm: String,

    #[validate(nested)]
    pub identity: BrandIdentity,

    #[validate(nested)]
    pub login_data: LoginData,

    #[validate(nested)]
    pub system_requirements: SystemRequirements,
}

fn validate_white_label_passwords(req: &SignupWhiteLabelRequest) -> Result<(), ValidationError> {
    passwords_match(&req.password, &req.password_confirm)
}
