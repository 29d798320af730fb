//! Storage layer for vf-billing
//!
//! JSON file storage with atomic writes. `Storage` owns one repository per
//! data file plus the audit logger, and is the only thing services touch.

pub mod bills;
pub mod faculty;
pub mod file_io;
pub mod init;
pub mod rate;

pub use bills::BillRepository;
pub use faculty::FacultyRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use rate::RateRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::BillingPaths;
use crate::error::BillingError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BillingPaths,
    pub faculty: FacultyRepository,
    pub bills: BillRepository,
    pub rate: RateRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: BillingPaths) -> Result<Self, BillingError> {
        paths.ensure_directories()?;

        Ok(Self {
            faculty: FacultyRepository::new(paths.faculty_file()),
            bills: BillRepository::new(paths.bills_file()),
            rate: RateRepository::new(paths.rate_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Open storage and load every data file
    pub fn open(paths: BillingPaths) -> Result<Self, BillingError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &BillingPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), BillingError> {
        self.faculty.load()?;
        self.bills.load()?;
        self.rate.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BillingError> {
        self.faculty.save()?;
        self.bills.save()?;
        self.rate.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), BillingError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update; the change summary is derived from the two snapshots
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), BillingError> {
        let diff = generate_diff(&serde_json::to_value(before)?, &serde_json::to_value(after)?);
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record several entries with one flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> Result<(), BillingError> {
        self.audit.log_batch(entries)
    }
}
