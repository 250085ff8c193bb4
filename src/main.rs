use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory::audit::Operation;
use inventory::cli::{
    handle_backup_command, handle_history_command, handle_product_command, BackupCommands,
    ProductCommands,
};
use inventory::config::{paths::InventoryPaths, settings::Settings};
use inventory::display::format_stats;
use inventory::storage::Inventory;

#[derive(Parser)]
#[command(
    name = "inventory",
    version,
    about = "Flat-file product inventory with dated backups and an audit log",
    long_about = "Keeps products in a semicolon-separated text file, takes dated \
                  snapshots of it, and records every operation in an append-only \
                  audit log."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Product management commands
    #[command(subcommand, alias = "p")]
    Product(ProductCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show the audit log
    History {
        /// Number of most recent lines to show (0 for all)
        #[arg(short = 'n', long, default_value_t = 20)]
        lines: usize,
    },

    /// Show inventory statistics
    Stats,

    /// Create the data directory, the inventory file and the settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let paths = InventoryPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Product(cmd)) => {
            let inventory = Inventory::open(paths, &settings)?;
            handle_product_command(&inventory, &settings, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            let inventory = Inventory::open(paths, &settings)?;
            handle_backup_command(&inventory, cmd)?;
        }
        Some(Commands::History { lines }) => {
            let inventory = Inventory::open(paths, &settings)?;
            handle_history_command(&inventory, lines)?;
        }
        Some(Commands::Stats) => {
            let inventory = Inventory::open(paths, &settings)?;
            let stats = inventory.products.stats()?;
            print!("{}", format_stats(&stats, &settings.currency_symbol));
        }
        Some(Commands::Init) => {
            println!("Initializing inventory at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            let inventory = Inventory::open(paths, &settings)?;
            inventory.audit.record(
                Operation::Initialize,
                format!("Settings saved: {}", inventory.paths().settings_file().display()),
            );
            println!("Inventory file: {}", inventory.paths().inventory_file().display());
            println!("Audit log:      {}", inventory.paths().audit_log().display());
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            println!("Inventory Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Inventory file:   {}", paths.inventory_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Backup prefix:       {}", settings.backup_prefix);
            println!("  Write mode:          {:?}", settings.write_mode);
            println!("  Low-stock threshold: {}", settings.low_stock_threshold);
            println!("  Currency symbol:     {}", settings.currency_symbol);
            if !paths.is_initialized() {
                println!();
                println!("Not initialized yet. Run 'inventory init'.");
            }
        }
        None => {
            println!("Inventory - flat-file product inventory");
            println!();
            println!("Run 'inventory --help' for usage information.");
        }
    }

    Ok(())
}
