mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use crate::commands::{
    cmd_clear, cmd_delete, cmd_export, cmd_history, cmd_import, cmd_log, cmd_show,
};
use crate::config::Config;
use karada_core::store::RecordStore;

#[derive(Parser)]
#[command(
    name = "karada",
    version,
    about = "A simple body weight and body fat tracker CLI",
    long_about = "\n\n  ██╗  ██╗ █████╗ ██████╗  █████╗ ██████╗  █████╗
  ██║ ██╔╝██╔══██╗██╔══██╗██╔══██╗██╔══██╗██╔══██╗
  █████╔╝ ███████║██████╔╝███████║██║  ██║███████║
  ██╔═██╗ ██╔══██║██╔══██╗██╔══██║██║  ██║██╔══██║
  ██║  ██╗██║  ██║██║  ██║██║  ██║██████╔╝██║  ██║
  ╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝╚═════╝ ╚═╝  ╚═╝
             know how you're trending.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a weight and body fat measurement
    Log {
        /// Weight value (number)
        weight: f64,
        /// Body fat percentage
        fat: f64,
        /// Unit for the weight value: kg or lbs (default: kg)
        #[arg(short, long, default_value = "kg")]
        unit: String,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the record for a specific date (default: today)
    Show {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show measurement history
    History {
        /// Number of days to show (default: all)
        #[arg(short, long)]
        days: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the record for a date
    Delete {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow)
        date: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all records
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export all records to a CSV file
    Export {
        /// Output file path (default: `weight_fat_records_<date>.csv`)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import records from a CSV file
    Import {
        /// Path to the CSV file
        file: std::path::PathBuf,
        /// Preview import without making changes
        #[arg(long)]
        dry_run: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let store = RecordStore::open(&config.data_dir)?;

    match cli.command {
        Commands::Log {
            weight,
            fat,
            unit,
            date,
            json,
        } => cmd_log(&store, weight, fat, &unit, date, json),
        Commands::Show { date, json } => cmd_show(&store, date, json),
        Commands::History { days, json } => cmd_history(&store, days, json),
        Commands::Delete { date, json } => cmd_delete(&store, &date, json),
        Commands::Clear { yes, json } => cmd_clear(&store, yes, json),
        Commands::Export { output, json } => cmd_export(&store, output, json),
        Commands::Import {
            file,
            dry_run,
            json,
        } => cmd_import(&store, &file, dry_run, json),
    }
}
