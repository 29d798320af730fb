//! CLI commands for reports
//!
//! Generates the salary ledger and the personal summary, either for the
//! terminal or as CSV sheets.

use std::path::PathBuf;

use clap::Subcommand;

use super::{create_output, current_period, parse_month, parse_optional_month};
use crate::config::Settings;
use crate::error::BillingResult;
use crate::models::{Month, MonthRange, User};
use crate::reports::{LedgerReport, PersonalSummaryReport};
use crate::services::BillFilter;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Detailed salary ledger of the listed bills
    #[command(alias = "bills")]
    Ledger {
        /// Only bills for this month
        #[arg(short, long)]
        month: Option<String>,

        /// Only bills for this year
        #[arg(short, long)]
        year: Option<i32>,

        /// Match faculty name or ID
        #[arg(short, long)]
        search: Option<String>,

        /// Year printed in the title (defaults to --year, then the current year)
        #[arg(long)]
        title_year: Option<i32>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Salary ledger for a single month
    Monthly {
        /// Month name, abbreviation or number
        month: String,

        /// Year
        year: i32,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Faculty-wise honorarium summary for a month range
    #[command(alias = "personal")]
    Summary {
        /// First month of the range (default: January)
        #[arg(long)]
        from: Option<String>,

        /// Last month of the range (default: December)
        #[arg(long)]
        to: Option<String>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: ReportCommands,
) -> BillingResult<()> {
    match cmd {
        ReportCommands::Ledger {
            month,
            year,
            search,
            title_year,
            output,
        } => {
            let filter = BillFilter {
                faculty_id: None,
                month: parse_optional_month(month)?,
                year,
                search,
            };
            let title_year = title_year.or(year).unwrap_or_else(|| current_period().1);
            let report = LedgerReport::generate(
                storage,
                user,
                &settings.headings,
                &filter,
                None,
                title_year,
            )?;
            emit_ledger(&report, settings, output)
        }

        ReportCommands::Monthly {
            month,
            year,
            output,
        } => {
            let month = parse_month(&month)?;
            let report = LedgerReport::generate(
                storage,
                user,
                &settings.headings,
                &BillFilter::period(month, year),
                Some((month, year)),
                year,
            )?;
            emit_ledger(&report, settings, output)
        }

        ReportCommands::Summary {
            from,
            to,
            year,
            output,
        } => {
            let start = parse_optional_month(from)?.unwrap_or(Month::January);
            let end = parse_optional_month(to)?.unwrap_or(Month::December);
            let range = MonthRange::new(start, end, year.unwrap_or_else(|| current_period().1));

            let report = PersonalSummaryReport::generate(storage, user, &settings.headings, range)?;

            if let Some(path) = output {
                let mut writer = create_output(&path)?;
                report.export_csv(&mut writer)?;
                println!("Personal summary exported to: {}", path.display());
            } else if report.is_empty() {
                println!("No bills between {}.", range.label());
            } else {
                println!("{}", report.format_terminal());
            }
            Ok(())
        }
    }
}

fn emit_ledger(
    report: &LedgerReport,
    settings: &Settings,
    output: Option<PathBuf>,
) -> BillingResult<()> {
    if let Some(path) = output {
        let mut writer = create_output(&path)?;
        report.export_csv(&mut writer)?;
        println!("Ledger exported to: {}", path.display());
    } else if report.is_empty() {
        println!("No bills to report.");
    } else {
        println!("{}", report.format_terminal(&settings.currency_symbol));
    }
    Ok(())
}
