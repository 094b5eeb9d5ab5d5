mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pronto",
    version,
    about = "Import daily attendance reports into a monthly duty roster"
)]
struct Cli {
    /// Log pipeline steps to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge one day's attendance report (PDF or XLSX) into a roster file
    Import {
        /// Path to PDF or XLSX report
        input_file: PathBuf,

        /// Roster JSON file (created if missing)
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,

        /// Import config JSON (defaults apply when omitted)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write this day (1-31) instead of the date found in the report
        #[arg(long, value_name = "N")]
        day: Option<u32>,

        /// Report what would change without saving the roster
        #[arg(long)]
        dry_run: bool,

        /// Show how every data row was classified and matched
        #[arg(long)]
        trace: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print the row/cell grid read from a report, without importing
    Grid {
        /// Path to PDF or XLSX report
        input_file: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Set or clear one day of one person's schedule
    Set {
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,

        #[arg(long)]
        id: String,

        /// Day of the month (1-31)
        #[arg(long)]
        day: u32,

        /// Status code (P, F, FE, ...) or "clear"
        #[arg(long)]
        status: String,
    },
    /// Apply one status to a range of days for several persons
    ApplyRange {
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,

        /// Person id (repeatable)
        #[arg(
            long = "id",
            value_name = "ID",
            conflicts_with = "sector",
            required_unless_present = "sector"
        )]
        ids: Vec<String>,

        /// Select everyone in this sector instead of listing ids
        #[arg(long)]
        sector: Option<String>,

        /// First day (1-31, inclusive)
        #[arg(long)]
        start: u32,

        /// Last day (1-31, inclusive)
        #[arg(long)]
        end: u32,

        /// Status code (P, F, FE, ...)
        #[arg(long)]
        status: String,
    },
    /// Headcount per status for one day
    Summary {
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,

        /// Day of the month (1-31)
        #[arg(long)]
        day: u32,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List the attendance status codes
    Statuses,
    /// Inspect import configs
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default config as JSON
    Show,
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pronto_core=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Import {
            input_file,
            roster,
            config,
            day,
            dry_run,
            trace,
            output,
        } => commands::import::run(commands::import::ImportArgs {
            input_file,
            roster,
            config,
            day,
            dry_run,
            trace,
            output_format: output,
        }),
        Commands::Grid {
            input_file,
            config,
            output,
        } => commands::grid::run(input_file, config, &output),
        Commands::Set {
            roster,
            id,
            day,
            status,
        } => commands::schedule::set(&roster, &id, day, &status),
        Commands::ApplyRange {
            roster,
            ids,
            sector,
            start,
            end,
            status,
        } => commands::schedule::apply_range(&roster, ids, sector, start, end, &status),
        Commands::Summary {
            roster,
            day,
            output,
        } => commands::schedule::summary(&roster, day, &output),
        Commands::Statuses => commands::statuses::list(),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
