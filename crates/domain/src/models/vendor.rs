//! Vendor onboarding models.
//!
//! File fields (portfolio images, logo, documents) carry paths of files that
//! were already uploaded elsewhere.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VendorIdentity {
    #[validate(length(min = 2, max = 50, message = "Brand name must be between 2 and 50 characters"))]
    pub brand_name: String,

    #[validate(length(
        min = 2,
        max = 100,
        message = "Owner full name must be between 2 and 100 characters"
    ))]
    pub owner_full_name: String,

    #[validate(custom(function = "shared::validation::validate_non_empty_list"))]
    pub service_type: Vec<String>,

    #[validate(custom(function = "shared::validation::validate_phone_length"))]
    pub phone_number: String,

    #[validate(
        email(message = "Please provide a valid email"),
        custom(function = "shared::validation::validate_email_length")
    )]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceData {
    #[validate(length(
        min = 10,
        max = 500,
        message = "Service description must be between 10 and 500 characters"
    ))]
    pub service_description: String,

    #[serde(default)]
    pub service_categories: Vec<String>,

    #[validate(length(min = 2, message = "City must be at least 2 characters"))]
    pub city: String,

    #[serde(default)]
    pub coverage_area: Vec<String>,

    pub other_data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PricePackage {
    #[validate(length(min = 1, message = "Package name is required"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "Package price cannot be negative"))]
    pub price: f64,

    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SamplesAndPackages {
    #[validate(length(min = 1, message = "At least one portfolio image is required"))]
    pub portfolio_images: Vec<String>,

    pub business_logo: Option<String>,

    #[validate(length(min = 1, message = "At least one price package is required"), nested)]
    pub price_packages: Vec<PricePackage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommercialVerification {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub commercial_record: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub national_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub terms_for_refund: Option<String>,
    #[serde(default)]
    pub payment_options: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OtherLinksAndData {
    #[validate(url(message = "Instagram link must be a valid URL"))]
    pub instagram_link: Option<String>,
    #[validate(url(message = "LinkedIn link must be a valid URL"))]
    pub linkedin_link: Option<String>,
    #[validate(url(message = "Website link must be a valid URL"))]
    pub website_link: Option<String>,
    pub additional_services: Option<String>,
    pub cv: Option<String>,
    pub profile_file: Option<String>,
}

/// Everything a vendor submits at onboarding except the password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfile {
    #[validate(nested)]
    pub identity: VendorIdentity,

    #[validate(nested)]
    pub service_data: ServiceData,

    #[validate(nested)]
    pub samples_and_packages: SamplesAndPackages,

    #[validate(nested)]
    pub commercial_verification: CommercialVerification,

    #[serde(default)]
    pub payment_data: PaymentData,

    #[serde(default)]
    #[validate(nested)]
    pub other_links_and_data: OtherLinksAndData,
}

/// Request body for vendor onboarding.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_vendor_passwords"))]
pub struct SignupVendorRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: VendorProfile,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub password_confirm: String,
}

impl SignupVendorRequest {
    /// Contact email, lowercased the way it is stored.
    pub fn email(&self) -> String {
        self.profile.identity.email.trim().to_lowercase()
    }

    pub fn phone_number(&self) -> String {
        self.profile.identity.phone_number.trim().to_string()
    }
}

fn validate_vendor_passwords(req: &SignupVendorRequest) -> Result<(), ValidationError> {
    passwords_match(&req.password, &req.password_confirm)
}

/// Shared password confirmation rule for every signup form.
pub fn passwords_match(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password == confirm {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_mismatch");
        err.message = Some("Passwords are not the same".into());
        Err(err)
    }
}
