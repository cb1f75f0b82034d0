// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! OfferLens CLI - Amazon product catalog queries from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Fetch items by ASIN
//! offerlens items B08N5WRWNW B07XJ8C8F5
//!
//! # Search the catalog
//! offerlens search wireless headphones --item-count 5
//!
//! # Fetch browse nodes
//! offerlens browse 283155
//!
//! # Use the legacy PA-API backend
//! offerlens --source paapi items B08N5WRWNW
//!
//! # Process a batch file, one output record per input record
//! offerlens run batch.json --continue-on-fail
//!
//! # JSON output
//! offerlens items B08N5WRWNW --format json --pretty
//!
//! # List sources / verify credentials
//! offerlens sources
//! offerlens check
//! ```

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{browse, check, items, run, search, sources};

// ============================================================================
// CLI Definition
// ============================================================================

/// OfferLens CLI - Amazon product catalog queries.
#[derive(Parser)]
#[command(name = "offerlens")]
#[command(about = "Amazon product catalog query CLI")]
#[command(long_about = r"
OfferLens queries Amazon product data through interchangeable backends.

Supported sources:
  • Amazon Creators API (creators) - OAuth2, camelCase responses
  • Amazon PA-API 5.0 (paapi)     - SigV4 signing, PascalCase responses

Credentials live in a YAML config file (offerlens check shows where).

Examples:
  offerlens items B08N5WRWNW            # Fetch one item
  offerlens search usb hub              # Keyword search
  offerlens browse 283155               # Browse node lookup
  offerlens run batch.json              # Batch of inputs from a file
  offerlens --source paapi items B0X    # Pick the backend explicitly
  offerlens --format json items B0X     # JSON output
")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Catalog source to query (creators or paapi).
    #[arg(long, short, global = true)]
    pub source: Option<String>,

    /// Path to the config file (default: the platform config dir,
    /// overridable via OFFERLENS_CONFIG).
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch catalog items by ASIN.
    #[command(visible_alias = "i")]
    Items(items::ItemsArgs),

    /// Search the catalog by keywords.
    #[command(visible_alias = "s")]
    Search(search::SearchArgs),

    /// Fetch browse nodes by identifier.
    #[command(visible_alias = "b")]
    Browse(browse::BrowseArgs),

    /// Process a batch file of operation inputs.
    #[command(visible_alias = "r")]
    Run(run::RunArgs),

    /// List the available catalog sources.
    Sources,

    /// Verify the configuration resolves for each source.
    Check,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Configuration missing or unusable.
    ConfigError = 2,
    /// Every record in the batch failed.
    RequestFailed = 3,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref(), verbose);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds the log filter: `RUST_LOG` wins when set and valid, otherwise
/// verbosity picks the default directives.
fn log_filter(env: Option<&str>, verbose: bool) -> EnvFilter {
    if let Some(directives) = env {
        if !directives.trim().is_empty() {
            if let Ok(filter) = EnvFilter::try_new(directives) {
                return filter;
            }
        }
    }
    if verbose {
        EnvFilter::new("offerlens=debug,info")
    } else {
        EnvFilter::new("offerlens=warn")
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Items(args) => items::run(args, &cli).await,
        Commands::Search(args) => search::run(args, &cli).await,
        Commands::Browse(args) => browse::run(args, &cli).await,
        Commands::Run(args) => run::run(args, &cli).await,
        Commands::Sources => sources::run(&cli),
        Commands::Check => check::run(&cli),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(exit_code_for(&e) as i32);
    }

    Ok(())
}

/// Maps a command failure to its exit code. Configuration problems get
/// their own code so scripts can tell them from request failures.
fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    if error.downcast_ref::<config::ConfigError>().is_some() {
        ExitCode::ConfigError
    } else {
        ExitCode::Error
    }
}

// ============================================================================
// Tests
// ============================================================================
