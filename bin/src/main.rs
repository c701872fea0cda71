//! Ronda CLI binary.
//!
//! Provides a command-line interface for the ronda ratio engine.

mod cmd;
mod data;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ronda")]
#[command(about = "Financial ratios and commentary for company statements", long_about = None)]
#[command(version)]
struct Cli {
    /// Log engine decisions to stderr (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Statement input shared by the data commands.
#[derive(Debug, Args)]
struct InputArgs {
    /// JSON file with an array of statement records
    #[arg(short, long)]
    input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List available ratios, or describe one
    List {
        /// Ratio name or alias to describe (e.g. roe, return_on_assets)
        name: Option<String>,

        /// Filter by insight category
        #[arg(short, long)]
        category: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show ratios for every period of an entity
    Ratios {
        #[command(flatten)]
        input: InputArgs,

        /// Entity identifier
        #[arg(short, long)]
        entity: String,
    },

    /// Derive insights for an entity
    Insights {
        #[command(flatten)]
        input: InputArgs,

        /// Entity identifier
        #[arg(short, long)]
        entity: String,

        /// JSON file with insight thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Full report: ratios per period and insights
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Entity identifier
        #[arg(short, long)]
        entity: String,

        /// JSON file with insight thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Compare ratios across entities
    Compare {
        #[command(flatten)]
        input: InputArgs,

        /// Entity identifiers
        #[arg(short, long, value_delimiter = ',', required = true)]
        entities: Vec<String>,

        /// Fiscal year to compare (defaults to each entity's latest period)
        #[arg(short, long)]
        year: Option<i32>,

        /// Fiscal quarter (1-4), requires --year
        #[arg(short, long, requires = "year")]
        quarter: Option<u8>,
    },

    /// Average ratios across a sector
    Sector {
        #[command(flatten)]
        input: InputArgs,

        /// Sector label (case-insensitive)
        #[arg(short, long)]
        sector: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    dotenvy::dotenv().ok();

    let fallback = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::List {
            name,
            category,
            verbose,
        } => match name {
            Some(name) => cmd::list::describe_ratio(&name)?,
            None => cmd::list::list_ratios(category.as_deref(), verbose)?,
        },
        Commands::Ratios { input, entity } => {
            cmd::ratios::show_ratios(&input.input, &entity, input.format)?;
        }
        Commands::Insights {
            input,
            entity,
            config,
        } => {
            cmd::insights::show_insights(&input.input, &entity, config.as_deref(), input.format)?;
        }
        Commands::Analyze {
            input,
            entity,
            config,
        } => {
            cmd::analyze::analyze(&input.input, &entity, config.as_deref(), input.format)?;
        }
        Commands::Compare {
            input,
            entities,
            year,
            quarter,
        } => {
            let period = data::period_key(year, quarter)?;
            cmd::compare::compare(&input.input, &entities, period, input.format)?;
        }
        Commands::Sector { input, sector } => {
            cmd::sector::show_sector(&input.input, &sector, input.format)?;
        }
    }

    Ok(())
}
