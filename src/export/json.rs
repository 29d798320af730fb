//! JSON export
//!
//! Exports every faculty record, bill and the saved rate with a schema
//! version. Credential hashes are never exported.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, BillingResult};
use crate::models::{BillEntry, FacultyRecord, Money, RateConfig, User};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub faculty: Vec<FacultyRecord>,
    pub bills: Vec<BillEntry>,
    /// `None` until an admin saves a rate
    pub rate: Option<RateConfig>,
    pub metadata: ExportMetadata,
}

/// Counts and totals for a quick sanity check of an export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub faculty_count: usize,
    pub bill_count: usize,
    pub total_billed: Money,
}

impl FullExport {
    /// Snapshot all data (admin only)
    pub fn from_storage(storage: &Storage, user: &User) -> BillingResult<Self> {
        if !user.is_admin() {
            return Err(BillingError::Forbidden("only admins can export all data".into()));
        }

        let faculty: Vec<FacultyRecord> = storage
            .faculty
            .get_all()?
            .into_iter()
            .map(|mut f| {
                f.secret_hash = None;
                f
            })
            .collect();
        let bills = storage.bills.get_all()?;

        let metadata = ExportMetadata {
            faculty_count: faculty.len(),
            bill_count: bills.len(),
            total_billed: bills.iter().map(|b| b.total_amount).sum(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            faculty,
            bills,
            rate: storage.rate.get()?,
            metadata,
        })
    }
}

/// Export all data as pretty JSON
pub fn export_full_json<W: Write>(storage: &Storage, user: &User, writer: W) -> BillingResult<()> {
    let export = FullExport::from_storage(storage, user)?;
    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| BillingError::Export(e.to_string()))
}
