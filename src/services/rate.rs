//! Rate service
//!
//! Reads and changes the global hourly rate. A change applies only to bills
//! created afterwards.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{BillingError, BillingResult};
use crate::models::{Money, RateConfig, User};
use crate::storage::Storage;

/// Service for the hourly rate
pub struct RateService<'a> {
    storage: &'a Storage,
}

impl<'a> RateService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The rate in force: the saved rate, or `default_rate` if none was saved
    pub fn current(&self, default_rate: Money) -> BillingResult<Money> {
        Ok(self
            .storage
            .rate
            .get()?
            .map(|r| r.rate_per_hour)
            .unwrap_or(default_rate))
    }

    /// The saved rate record, if an admin has set one
    pub fn saved(&self) -> BillingResult<Option<RateConfig>> {
        self.storage.rate.get()
    }

    /// Overwrite the rate (admin only)
    pub fn set(&self, user: &User, rate_per_hour: Money) -> BillingResult<RateConfig> {
        if !user.is_admin() {
            return Err(BillingError::Forbidden("only admins can change the rate".into()));
        }

        let rate = RateConfig::new(rate_per_hour);
        rate.validate()
            .map_err(|e| BillingError::Validation(e.to_string()))?;

        let previous = self.storage.rate.set(rate)?;
        self.storage.rate.save()?;

        match previous {
            Some(before) => self.storage.log_update(
                EntityType::Rate,
                "rate",
                None,
                &before,
                &rate,
            )?,
            None => self
                .storage
                .log_create(EntityType::Rate, "rate", None, &rate)?,
        }

        info!(
            rate = %rate.rate_per_hour,
            previous = ?previous.map(|r| r.rate_per_hour.to_string()),
            "hourly rate updated"
        );
        Ok(rate)
    }
}
