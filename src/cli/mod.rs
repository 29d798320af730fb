//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod bill;
pub mod export;
pub mod faculty;
pub mod rate;
pub mod report;

pub use audit::handle_audit_command;
pub use bill::{handle_bill_command, BillCommands};
pub use export::{handle_export_command, ExportCommands, ExportFormat};
pub use faculty::{handle_faculty_command, FacultyCommands};
pub use rate::{handle_rate_command, RateCommands};
pub use report::{handle_report_command, ReportCommands};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::Datelike;

use crate::error::{BillingError, BillingResult};
use crate::models::{FacultyId, Month, User};

/// Open `path` for writing an export
pub(crate) fn create_output(path: &Path) -> BillingResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BillingError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Parse a month given by name, abbreviation or number
pub(crate) fn parse_month(input: &str) -> BillingResult<Month> {
    input.parse::<Month>().map_err(|e| {
        BillingError::Validation(format!("{}. Use a name (March), abbreviation (Mar) or 1-12", e))
    })
}

pub(crate) fn parse_optional_month(input: Option<String>) -> BillingResult<Option<Month>> {
    input.as_deref().map(parse_month).transpose()
}

/// The current calendar month and year in local time
pub(crate) fn current_period() -> (Month, i32) {
    let today = chrono::Local::now().date_naive();
    let month = Month::from_number(today.month()).unwrap_or(Month::January);
    (month, today.year())
}

/// Resolve the faculty a command targets
///
/// Faculty sessions default to themselves; admins must name one.
pub(crate) fn target_faculty(user: &User, faculty: Option<String>) -> BillingResult<FacultyId> {
    match (faculty, user.faculty_scope()) {
        (Some(id), _) => Ok(FacultyId::new(id)),
        (None, Some(own)) => Ok(own),
        (None, None) => Err(BillingError::Validation(
            "--faculty is required when acting as admin".into(),
        )),
    }
}
