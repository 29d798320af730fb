use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vf_billing::cli::{
    handle_audit_command, handle_bill_command, handle_export_command, handle_faculty_command,
    handle_rate_command, handle_report_command,
};
use vf_billing::config::{paths::BillingPaths, settings::Settings};
use vf_billing::models::{FacultyId, User};
use vf_billing::services::FacultyService;
use vf_billing::storage::Storage;

#[derive(Parser)]
#[command(
    name = "vfbill",
    author = "Kaylee Beyene",
    version,
    about = "Visiting faculty lecture billing and honorarium reports",
    long_about = "vfbill records the lectures visiting faculty deliver, prices them at \
                  the hourly rate, and produces the salary ledger and the personal \
                  honorarium summary as terminal tables or CSV sheets."
)]
struct Cli {
    /// Act as this faculty member instead of the administrator
    #[arg(long, global = true, value_name = "ID")]
    as_faculty: Option<String>,

    /// Faculty session password
    #[arg(long, global = true, env = "VF_BILLING_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Faculty management commands
    #[command(subcommand)]
    Faculty(vf_billing::cli::FacultyCommands),

    /// Bill management commands
    #[command(subcommand)]
    Bill(vf_billing::cli::BillCommands),

    /// Hourly rate commands
    #[command(subcommand)]
    Rate(vf_billing::cli::RateCommands),

    /// Ledger and summary reports
    #[command(subcommand)]
    Report(vf_billing::cli::ReportCommands),

    /// Data export commands
    #[command(subcommand)]
    Export(vf_billing::cli::ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BillingPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_level);

    let storage = Storage::open(paths.clone())?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("vfbill - visiting faculty billing");
            println!();
            println!("Run 'vfbill init' to create the data directory.");
            println!("Run 'vfbill --help' for usage information.");
            return Ok(());
        }
    };

    if !matches!(command, Commands::Init | Commands::Config) && !storage.is_initialized() {
        warn!(
            path = %paths.base_dir().display(),
            "data directory not initialized; run 'vfbill init'"
        );
    }

    let user = match &cli.as_faculty {
        Some(id) => FacultyService::new(&storage)
            .authenticate(&FacultyId::new(id.as_str()), cli.password.as_deref())?,
        None => User::admin(),
    };

    match command {
        Commands::Init => {
            println!("Initializing vfbill at: {}", paths.base_dir().display());
            let created = vf_billing::storage::init::initialize_storage(&paths)?;
            if created {
                println!("Initialization complete!");
                println!();
                println!("Next steps:");
                println!("  vfbill rate set 500");
                println!("  vfbill faculty register --help");
            } else {
                println!("Already initialized; missing data files were recreated.");
            }
        }
        Commands::Config => {
            println!("vfbill Configuration");
            println!("====================");
            println!("Config directory: {}", paths.config_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Organization:    {}", settings.headings.organization);
            println!("  Department:      {}", settings.headings.department);
            println!("  Summary heading: {}", settings.headings.summary_organization);
            println!("  Summary bank:    {}", settings.headings.summary_bank);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!(
                "  Default rate:    {}",
                settings
                    .default_rate
                    .format_with_symbol(&settings.currency_symbol)
            );
            println!("  Log level:       {}", settings.log_level);
        }
        Commands::Faculty(cmd) => {
            handle_faculty_command(&storage, &user, cli.password.as_deref(), cmd)?;
        }
        Commands::Bill(cmd) => {
            handle_bill_command(&storage, &settings, &user, cmd)?;
        }
        Commands::Rate(cmd) => {
            handle_rate_command(&storage, &settings, &user, cmd)?;
        }
        Commands::Report(cmd) => {
            handle_report_command(&storage, &settings, &user, cmd)?;
        }
        Commands::Export(cmd) => {
            handle_export_command(&storage, &settings, &user, cmd)?;
        }
        Commands::Audit { limit } => {
            handle_audit_command(&storage, &user, limit)?;
        }
    }

    Ok(())
}
