//! Faculty CLI commands
//!
//! Registration, directory lookups and removal of faculty members.

use clap::{Args, Subcommand};

use crate::display::{format_faculty_details, format_faculty_list};
use crate::error::{BillingError, BillingResult};
use crate::models::{FacultyId, FacultyProfile, User};
use crate::services::FacultyService;
use crate::storage::Storage;

/// Registration fields
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Email address (must be unique)
    #[arg(long)]
    pub email: String,

    /// Phone number
    #[arg(long)]
    pub phone: String,

    /// Bank account number
    #[arg(long = "account")]
    pub bank_account_number: String,

    /// 11-character IFSC code
    #[arg(long = "ifsc")]
    pub ifsc_code: String,

    /// Bank name
    #[arg(long = "bank")]
    pub bank_name: String,

    /// 10-character PAN
    #[arg(long = "pan")]
    pub pan_number: String,

    /// 12-digit Aadhar number
    #[arg(long = "aadhar")]
    pub aadhar_number: String,

    /// Protect the faculty session with a password
    #[arg(long)]
    pub with_password: bool,
}

impl From<RegisterArgs> for FacultyProfile {
    fn from(args: RegisterArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            bank_account_number: args.bank_account_number,
            ifsc_code: args.ifsc_code,
            bank_name: args.bank_name,
            pan_number: args.pan_number,
            aadhar_number: args.aadhar_number,
        }
    }
}

/// Faculty subcommands
#[derive(Subcommand, Debug)]
pub enum FacultyCommands {
    /// Register a new faculty member
    Register(RegisterArgs),

    /// List all registered faculty
    List,

    /// Show one faculty member's details
    Show {
        /// Faculty ID (FAC-...)
        id: String,
    },

    /// Search faculty by name, ID or email
    Search {
        /// Search text
        query: String,
    },

    /// Delete a faculty member and all of their bills
    Delete {
        /// Faculty ID (FAC-...)
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a faculty command
///
/// `password` is the session password supplied on the command line or via
/// the environment; registration uses it instead of prompting when present.
pub fn handle_faculty_command(
    storage: &Storage,
    user: &User,
    password: Option<&str>,
    cmd: FacultyCommands,
) -> BillingResult<()> {
    let service = FacultyService::new(storage);

    match cmd {
        FacultyCommands::Register(args) => {
            let secret = if args.with_password {
                Some(match password {
                    Some(p) => p.to_string(),
                    None => prompt_new_password()?,
                })
            } else {
                None
            };

            let record = service.register(args.into(), secret.as_deref())?;
            println!("Registered faculty: {} ({})", record.name, record.id);
        }

        FacultyCommands::List => {
            require_admin(user, "list faculty")?;
            println!("{}", format_faculty_list(&service.list()?));
        }

        FacultyCommands::Show { id } => {
            let id = FacultyId::new(id);
            if let Some(own) = user.faculty_scope() {
                if own != id {
                    return Err(BillingError::Forbidden(
                        "faculty can only view their own record".into(),
                    ));
                }
            }
            println!("{}", format_faculty_details(&service.get(&id)?));
        }

        FacultyCommands::Search { query } => {
            require_admin(user, "search faculty")?;
            let found = service.search(&query)?;
            if found.is_empty() {
                println!("No faculty match '{}'.", query);
            } else {
                println!("{}", format_faculty_list(&found));
            }
        }

        FacultyCommands::Delete { id, force } => {
            let id = FacultyId::new(id);
            if !force {
                let faculty = service.get(&id)?;
                let bill_count = storage.bills.get_by_faculty(&id)?.len();
                println!(
                    "This will delete {} ({}) and {} bill(s).",
                    faculty.name, faculty.id, bill_count
                );
                println!("Re-run with --force to confirm.");
                return Ok(());
            }

            let removed = service.delete(user, &id)?;
            println!(
                "Deleted faculty: {} ({} bill(s) removed)",
                removed.faculty.name,
                removed.bills.len()
            );
        }
    }

    Ok(())
}

fn require_admin(user: &User, action: &str) -> BillingResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(BillingError::Forbidden(format!("only admins can {}", action)))
    }
}

fn prompt_new_password() -> BillingResult<String> {
    let first = rpassword::prompt_password("Password: ")?;
    let second = rpassword::prompt_password("Confirm password: ")?;
    if first != second {
        return Err(BillingError::Validation("Passwords do not match".into()));
    }
    Ok(first)
}
