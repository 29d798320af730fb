//! Hourly rate CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{BillingError, BillingResult};
use crate::models::{Money, User};
use crate::services::RateService;
use crate::storage::Storage;

/// Rate subcommands
#[derive(Subcommand, Debug)]
pub enum RateCommands {
    /// Show the hourly rate in force
    Show,

    /// Set the hourly rate (admin only)
    Set {
        /// Rate per hour (e.g., "500" or "₹650.50")
        amount: String,
    },
}

/// Handle a rate command
pub fn handle_rate_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: RateCommands,
) -> BillingResult<()> {
    let service = RateService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        RateCommands::Show => match service.saved()? {
            Some(rate) => println!(
                "Rate per hour: {} (updated {})",
                rate.rate_per_hour.format_with_symbol(symbol),
                rate.updated_at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => println!(
                "Rate per hour: {} (default)",
                service
                    .current(settings.default_rate)?
                    .format_with_symbol(symbol)
            ),
        },

        RateCommands::Set { amount } => {
            let rate = Money::parse(&amount)
                .map_err(|e| BillingError::Validation(format!("Invalid rate: {}", e)))?;
            let saved = service.set(user, rate)?;
            println!(
                "Rate per hour set to {}",
                saved.rate_per_hour.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
