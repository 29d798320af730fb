//! Hourly rate configuration
//!
//! A single slot holding the rate applied to newly created bills. Existing
//! bills keep the rate they were created with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// The current hourly rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    pub rate_per_hour: Money,
    pub updated_at: DateTime<Utc>,
}

impl RateConfig {
    /// Create a rate stamped with the current time
    pub fn new(rate_per_hour: Money) -> Self {
        Self {
            rate_per_hour,
            updated_at: Utc::now(),
        }
    }

    /// The rate must be strictly positive
    pub fn validate(&self) -> Result<(), RateValidationError> {
        if self.rate_per_hour.is_positive() {
            Ok(())
        } else {
            Err(RateValidationError::NotPositive(self.rate_per_hour))
        }
    }
}

/// Validation errors for rates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateValidationError {
    #[error("Please enter a valid rate (got {0})")]
    NotPositive(Money),
}
