//! Rate repository
//!
//! rate.json holds a single optional slot. An empty slot means no admin has
//! saved a rate yet and the settings default applies.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BillingError;
use crate::models::RateConfig;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RateData {
    #[serde(default)]
    rate: Option<RateConfig>,
}

/// Repository for the hourly rate slot
pub struct RateRepository {
    path: PathBuf,
    data: RwLock<Option<RateConfig>>,
}

impl RateRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(None),
        }
    }

    pub fn load(&self) -> Result<(), BillingError> {
        let file_data: RateData = read_json(&self.path)?;
        *self
            .data
            .write()
            .map_err(|e| BillingError::Storage(format!("Failed to acquire write lock: {}", e)))? =
            file_data.rate;
        Ok(())
    }

    pub fn save(&self) -> Result<(), BillingError> {
        let rate = self.get()?;
        write_json_atomic(&self.path, &RateData { rate })
    }

    /// The saved rate, if any
    pub fn get(&self) -> Result<Option<RateConfig>, BillingError> {
        let data = self
            .data
            .read()
            .map_err(|e| BillingError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(*data)
    }

    /// Overwrite the slot, returning the previous rate
    pub fn set(&self, rate: RateConfig) -> Result<Option<RateConfig>, BillingError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BillingError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(data.replace(rate))
    }
}
