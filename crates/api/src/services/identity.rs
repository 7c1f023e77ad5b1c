//! Account resolution across the host and vendor tables.
//!
//! Every lookup probes hosts first and falls back to vendors, so an email
//! registered in both tables always resolves to the host.

use domain::models::{Account, AccountKind};
use persistence::repositories::{HostRepository, VendorRepository};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct IdentityResolver {
    hosts: HostRepository,
    vendors: VendorRepository,
}

impl IdentityResolver {
    pub fn new(pool: PgPool) -> Self {
        Self {
            hosts: HostRepository::new(pool.clone()),
            vendors: VendorRepository::new(pool),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, sqlx::Error> {
        let email = email.trim().to_lowercase();
        if let Some(host) = self.hosts.find_by_email(&email).await? {
            return Ok(Some(Account::Host(host.into())));
        }
        Ok(self
            .vendors
            .find_by_email(&email)
            .await?
            .map(|vendor| Account::Vendor(vendor.into())))
    }

    pub async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Account>, sqlx::Error> {
        if let Some(host) = self.hosts.find_by_phone(phone_number).await? {
            return Ok(Some(Account::Host(host.into())));
        }
        Ok(self
            .vendors
            .find_by_phone(phone_number)
            .await?
            .map(|vendor| Account::Vendor(vendor.into())))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, sqlx::Error> {
        if let Some(host) = self.hosts.find_by_id(id).await? {
            return Ok(Some(Account::Host(host.into())));
        }
        Ok(self
            .vendors
            .find_by_id(id)
            .await?
            .map(|vendor| Account::Vendor(vendor.into())))
    }

    /// Lookup restricted to one table, for OTP records that name their kind.
    pub async fn find_by_kind(
        &self,
        kind: AccountKind,
        id: Uuid,
    ) -> Result<Option<Account>, sqlx::Error> {
        match kind {
            AccountKind::Host => Ok(self
                .hosts
                .find_by_id(id)
                .await?
                .map(|host| Account::Host(host.into()))),
            AccountKind::Vendor => Ok(self
                .vendors
                .find_by_id(id)
                .await?
                .map(|vendor| Account::Vendor(vendor.into()))),
        }
    }

    /// Account holding an unexpired reset token with this digest.
    pub async fn find_by_reset_token(
        &self,
        hashed_token: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        if let Some(host) = self.hosts.find_by_reset_token(hashed_token).await? {
            return Ok(Some(Account::Host(host.into())));
        }
        Ok(self
            .vendors
            .find_by_reset_token(hashed_token)
            .await?
            .map(|vendor| Account::Vendor(vendor.into())))
    }
}
