//! First-run setup
//!
//! Writes the settings file and empty data files so a fresh data directory
//! is complete and inspectable before the first command that changes data.

use crate::config::{paths::BillingPaths, settings::Settings};
use crate::error::BillingError;

use super::Storage;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running this twice is harmless.
/// Returns `true` when the settings file was created by this call.
pub fn initialize_storage(paths: &BillingPaths) -> Result<bool, BillingError> {
    paths.ensure_directories()?;

    let created = !paths.settings_file().exists();
    if created {
        Settings::default().save(paths)?;
    }

    let storage = Storage::open(paths.clone())?;
    if !paths.faculty_file().exists() {
        storage.faculty.save()?;
    }
    if !paths.bills_file().exists() {
        storage.bills.save()?;
    }
    if !paths.rate_file().exists() {
        storage.rate.save()?;
    }

    Ok(created)
}
