//! CLI commands for data export
//!
//! Writes the faculty directory as CSV or a full snapshot as JSON or YAML.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use super::create_output;
use crate::config::Settings;
use crate::error::{BillingError, BillingResult};
use crate::export::{export_faculty_csv, export_full_json, export_full_yaml, FullExport};
use crate::models::User;
use crate::storage::Storage;

/// Full export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the faculty directory to CSV
    Faculty {
        /// Output file path
        output: PathBuf,
    },

    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: ExportCommands,
) -> BillingResult<()> {
    match cmd {
        ExportCommands::Faculty { output } => {
            if !user.is_admin() {
                return Err(BillingError::Forbidden(
                    "only admins can export the faculty directory".into(),
                ));
            }
            let faculty = storage.faculty.get_all()?;
            let mut writer = create_output(&output)?;
            export_faculty_csv(&faculty, &mut writer)?;
            println!("Exported {} faculty to: {}", faculty.len(), output.display());
        }

        ExportCommands::All { output, format } => {
            if !user.is_admin() {
                return Err(BillingError::Forbidden("only admins can export all data".into()));
            }
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Json => export_full_json(storage, user, &mut writer)?,
                ExportFormat::Yaml => export_full_yaml(storage, user, &mut writer)?,
            }
            println!("Full database exported to: {}", output.display());
        }

        ExportCommands::Info => {
            let export = FullExport::from_storage(storage, user)?;
            println!("Export Information");
            println!("==================");
            println!("Schema version: {}", export.schema_version);
            println!("App version:    {}", export.app_version);
            println!("Faculty:        {}", export.metadata.faculty_count);
            println!("Bills:          {}", export.metadata.bill_count);
            println!(
                "Total billed:   {}",
                export
                    .metadata
                    .total_billed
                    .format_with_symbol(&settings.currency_symbol)
            );
        }
    }

    Ok(())
}
