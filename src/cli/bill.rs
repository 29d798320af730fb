//! Bill CLI commands
//!
//! Submitting bills, listing them, changing their status and showing totals.

use clap::Subcommand;

use super::{current_period, parse_month, parse_optional_month, target_faculty};
use crate::config::Settings;
use crate::display::{format_bill_list, format_bill_stats};
use crate::error::{BillingError, BillingResult};
use crate::models::{parse_dates, BillDraft, BillId, BillStatus, FacultyId, User};
use crate::services::{BillFilter, BillService, RateService};
use crate::storage::Storage;

/// Bill subcommands
#[derive(Subcommand, Debug)]
pub enum BillCommands {
    /// Submit a bill at the current hourly rate
    Add {
        /// Faculty ID (defaults to the faculty session)
        #[arg(short, long)]
        faculty: Option<String>,

        /// Class name (e.g., "BCA 2nd Year")
        #[arg(short, long)]
        class: String,

        /// Subject taught
        #[arg(short, long)]
        subject: String,

        /// Lecture dates, comma separated (e.g., "1st, 5th, 12th")
        #[arg(short, long)]
        dates: String,

        /// Total hours taught
        #[arg(long)]
        hours: f64,

        /// Month (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// List bills
    List {
        /// Only bills for this month
        #[arg(short, long)]
        month: Option<String>,

        /// Only bills for this year
        #[arg(short, long)]
        year: Option<i32>,

        /// Match faculty name or ID
        #[arg(short, long)]
        search: Option<String>,

        /// Only bills of this faculty ID
        #[arg(short, long)]
        faculty: Option<String>,
    },

    /// Set a bill's status (admin only)
    Status {
        /// Bill ID (bill-<uuid>)
        bill: String,

        /// New status: pending, approved or paid
        status: String,
    },

    /// Show earnings and status counts
    Stats {
        /// Only bills for this month
        #[arg(short, long)]
        month: Option<String>,

        /// Only bills for this year
        #[arg(short, long)]
        year: Option<i32>,

        /// Only bills of this faculty ID
        #[arg(short, long)]
        faculty: Option<String>,
    },
}

/// Handle a bill command
pub fn handle_bill_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: BillCommands,
) -> BillingResult<()> {
    let service = BillService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        BillCommands::Add {
            faculty,
            class,
            subject,
            dates,
            hours,
            month,
            year,
        } => {
            let faculty_id = target_faculty(user, faculty)?;
            let (current_month, current_year) = current_period();
            let month = match month {
                Some(m) => parse_month(&m)?,
                None => current_month,
            };

            let draft = BillDraft {
                class_name: class,
                subject,
                dates: parse_dates(&dates),
                total_hours: hours,
                month,
                year: year.unwrap_or(current_year),
            };
            let rate = RateService::new(storage).current(settings.default_rate)?;

            let bill = service.create(user, &faculty_id, draft, rate)?;
            println!(
                "Created bill {}: {} hours at {} = {}",
                bill.id,
                bill.total_hours,
                bill.rate_per_hour.format_with_symbol(symbol),
                bill.total_amount.format_with_symbol(symbol)
            );
        }

        BillCommands::List {
            month,
            year,
            search,
            faculty,
        } => {
            let filter = BillFilter {
                faculty_id: faculty.map(FacultyId::new),
                month: parse_optional_month(month)?,
                year,
                search,
            };
            let bills = service.list(user, &filter)?;
            println!("{}", format_bill_list(&bills, symbol));
        }

        BillCommands::Status { bill, status } => {
            let id: BillId = bill
                .parse()
                .map_err(|_| BillingError::Validation(format!("Invalid bill ID: {}", bill)))?;
            let status: BillStatus = status
                .parse()
                .map_err(|e: crate::models::BillValidationError| {
                    BillingError::Validation(e.to_string())
                })?;

            let updated = service.update_status(user, id, status)?;
            println!("Bill {} is now {}", updated.id, updated.status);
        }

        BillCommands::Stats {
            month,
            year,
            faculty,
        } => {
            let filter = BillFilter {
                faculty_id: faculty.map(FacultyId::new),
                month: parse_optional_month(month)?,
                year,
                search: None,
            };
            let stats = service.stats(user, &filter)?;
            println!("{}", format_bill_stats(&stats, symbol));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BillingPaths;
    use crate::models::faculty::fixtures::profile;
    use crate::models::{Money, Month};
    use crate::services::FacultyService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(BillingPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        (temp_dir, storage)
    }

    fn add(faculty: Option<String>, hours: f64) -> BillCommands {
        BillCommands::Add {
            faculty,
            class: "BCA 2nd Year".into(),
            subject: "Data Structures".into(),
            dates: "1st, 5th, 12th".into(),
            hours,
            month: Some("Mar".into()),
            year: Some(2024),
        }
    }

    #[test]
    fn test_add_uses_default_rate() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let asha = FacultyService::new(&storage)
            .register(profile("Asha Rao", "asha@example.com"), None)
            .unwrap();

        handle_bill_command(
            &storage,
            &settings,
            &User::admin(),
            add(Some(asha.id.to_string()), 9.0),
        )
        .unwrap();

        let bills = storage.bills.get_by_faculty(&asha.id).unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].month, Month::March);
        assert_eq!(bills[0].dates, vec!["1st", "5th", "12th"]);
        assert_eq!(bills[0].total_amount, Money::from_rupees(4500));
    }

    #[test]
    fn test_faculty_session_defaults_to_self() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = FacultyService::new(&storage)
            .register(profile("Asha Rao", "asha@example.com"), None)
            .unwrap();
        let user = User::faculty(&asha);

        handle_bill_command(&storage, &Settings::default(), &user, add(None, 2.0)).unwrap();
        assert_eq!(storage.bills.get_by_faculty(&asha.id).unwrap().len(), 1);
    }

    #[test]
    fn test_admin_must_name_faculty() {
        let (_temp_dir, storage) = create_test_storage();
        let err = handle_bill_command(&storage, &Settings::default(), &User::admin(), add(None, 2.0))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_status_rejects_bad_input() {
        let (_temp_dir, storage) = create_test_storage();
        let cmd = BillCommands::Status {
            bill: "not-a-bill".into(),
            status: "paid".into(),
        };
        let err = handle_bill_command(&storage, &Settings::default(), &User::admin(), cmd)
            .unwrap_err();
        assert!(err.is_validation());
    }
}
