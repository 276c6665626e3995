use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use fintrack::cli::{
    handle_audit_command, handle_entry_command, handle_export_command, handle_notify_command,
    handle_plan_command, handle_report_command, EntryCommands, ExportCommands, NotifyCommands,
    PlanCommands, ReportCommands,
};
use fintrack::config::{FinancePaths, Settings};
use fintrack::notify::{NotificationSink, TelegramSink};
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Terminal personal finance tracker",
    long_about = "fintrack records income and expenses, splits your salary into a \
                  budget plan, warns when a category overspends, and reports on \
                  periods and years."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income and expense entries
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Budget plan
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Period reports and year comparisons
    #[command(subcommand)]
    Report(ReportCommands),

    /// Notification history and delivery
    #[command(subcommand)]
    Notify(NotifyCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fintrack=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Init) => {
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!("Settings written to {}", paths.settings_file().display());
            return Ok(());
        }
        Some(Commands::Config) => {
            print_config(&paths, &settings);
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("fintrack - terminal personal finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            return Ok(());
        }
    };

    let sink = match TelegramSink::from_settings(&settings.notifications) {
        Ok(sink) => Some(sink),
        Err(e) => {
            tracing::debug!(error = %e, "notification delivery disabled");
            None
        }
    };
    let sink = sink.as_ref().map(|s| s as &dyn NotificationSink);

    let storage = Storage::open(paths, &settings);

    let outcome = match command {
        Commands::Entry(cmd) => handle_entry_command(&storage, sink, cmd),
        Commands::Plan(cmd) => handle_plan_command(&storage, cmd),
        Commands::Report(cmd) => handle_report_command(&storage, cmd),
        Commands::Notify(cmd) => handle_notify_command(&storage, sink, cmd),
        Commands::Export(cmd) => handle_export_command(&storage, cmd),
        Commands::Audit { limit } => handle_audit_command(&storage, limit),
        Commands::Init | Commands::Config => Ok(()),
    };

    // Persist whatever succeeded even when the command itself failed
    if let Err(e) = storage.close() {
        warn!(error = %e, "failed to save data");
    }

    outcome?;
    Ok(())
}

fn print_config(paths: &FinancePaths, settings: &Settings) {
    println!("fintrack Configuration");
    println!("======================");
    println!("Base directory:     {}", paths.base_dir().display());
    println!("Settings file:      {}", paths.settings_file().display());
    println!("Data directory:     {}", paths.data_dir().display());
    println!("Audit log:          {}", paths.audit_log().display());
    println!(
        "Initialized:        {}",
        if paths.is_initialized() { "yes" } else { "no" }
    );
    println!();
    println!("Settings:");
    println!("  Categories:       {}", settings.categories.join(", "));
    println!("  Salary category:  {}", settings.salary_category);
    println!("  Currency:         {}", settings.currency_symbol);
    println!("  Flush policy:     {:?}", settings.flush_policy);
    match settings.minimum_salary {
        Some(floor) => println!("  Minimum salary:   {:.2}", floor),
        None => println!("  Minimum salary:   none"),
    }
    println!("  Plan percentages:");
    for (category, pct) in &settings.plan_percentages {
        println!("    {:<14} {:>5.1}%", category, pct * 100.0);
    }
    match settings.notifications.chat_id {
        Some(id) => println!("  Alert chat id:    {}", id),
        None => println!("  Alert chat id:    not set"),
    }
}
