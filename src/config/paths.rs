//! Path management for vf-billing
//!
//! Resolves where configuration, the audit log, and the JSON data files live.
//!
//! ## Path Resolution Order
//!
//! 1. `VF_BILLING_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/vf-billing` on Linux, `%APPDATA%\vf-billing\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BillingError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "VF_BILLING_DATA_DIR";

/// Manages all paths used by vf-billing
#[derive(Debug, Clone)]
pub struct BillingPaths {
    /// Base directory for all billing data
    base_dir: PathBuf,
}

impl BillingPaths {
    /// Create a new BillingPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, BillingError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BillingPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config directory (same as base)
    pub fn config_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to faculty.json
    pub fn faculty_file(&self) -> PathBuf {
        self.data_dir().join("faculty.json")
    }

    /// Get the path to bills.json
    pub fn bills_file(&self) -> PathBuf {
        self.data_dir().join("bills.json")
    }

    /// Get the path to rate.json (the single hourly rate slot)
    pub fn rate_file(&self) -> PathBuf {
        self.data_dir().join("rate.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BillingError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BillingError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BillingError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if the application has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BillingError> {
    ProjectDirs::from("", "", "vf-billing")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            BillingError::Config(format!(
                "Could not determine a home directory; set {}",
                DATA_DIR_ENV
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillingPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        std::env::set_var(DATA_DIR_ENV, custom_path);
        let paths = BillingPaths::new().unwrap();
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillingPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillingPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.bills_file(),
            temp_dir.path().join("data").join("bills.json")
        );
        assert_eq!(
            paths.rate_file(),
            temp_dir.path().join("data").join("rate.json")
        );
    }
}
