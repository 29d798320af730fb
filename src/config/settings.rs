//! User settings for vf-billing
//!
//! Holds the report heading lines, the currency symbol, the hourly rate used
//! before an admin has saved one, and the default log level.

use serde::{Deserialize, Serialize};

use super::paths::BillingPaths;
use crate::error::BillingError;
use crate::models::Money;

/// Heading lines printed above the exported reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeadings {
    /// First ledger heading line
    pub organization: String,
    /// Second ledger heading line
    pub department: String,
    /// First personal summary heading line
    pub summary_organization: String,
    /// Bank line printed under the personal summary period
    pub summary_bank: String,
}

impl Default for ReportHeadings {
    fn default() -> Self {
        Self {
            organization: "DAVV, Indore".to_string(),
            department: "B.Voc.".to_string(),
            summary_organization: "DEEN DAYAL UPADHYAY KAUSHAL KENDRA, D.A.V.V., Indore"
                .to_string(),
            summary_bank: "State Bank of India".to_string(),
        }
    }
}

/// User settings for vf-billing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Report heading lines
    #[serde(default)]
    pub headings: ReportHeadings,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Hourly rate used until an admin saves one
    #[serde(default = "default_rate")]
    pub default_rate: Money,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_rate() -> Money {
    Money::from_rupees(500)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            headings: ReportHeadings::default(),
            currency_symbol: default_currency(),
            default_rate: default_rate(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &BillingPaths) -> Result<Self, BillingError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BillingError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BillingError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BillingPaths) -> Result<(), BillingError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BillingError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BillingError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
