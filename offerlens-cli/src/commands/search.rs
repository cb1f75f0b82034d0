//! Search command - keyword search against the catalog.

use anyhow::Result;
use clap::Args;

use offerlens_core::{Operation, OperationInput};

use crate::commands::request::{execute_single, render_envelope, RequestArgs};
use crate::config::Config;
use crate::Cli;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search keywords (joined with spaces).
    #[arg(required = true)]
    pub keywords: Vec<String>,

    /// Category to search within.
    #[arg(long, default_value = "All")]
    pub search_index: String,

    /// Number of results to return (1-50).
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=50))]
    pub item_count: u32,

    /// Result page to return (1-10).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub item_page: Option<u32>,

    #[command(flatten)]
    pub request: RequestArgs,
}

/// Runs the search command.
pub async fn run(args: &SearchArgs, cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let kind = config.resolve_source(cli.source.as_deref())?;

    let envelope = execute_single(&config, kind, build_input(args), &args.request).await?;
    render_envelope(&envelope, cli)
}

/// Builds the operation input from the parsed arguments.
fn build_input(args: &SearchArgs) -> OperationInput {
    let mut input = OperationInput::new(Operation::SearchItems);
    input.keywords = Some(args.keywords.join(" "));
    input.search_index = Some(args.search_index.clone());
    input.item_count = Some(args.item_count);
    input.options.item_page = args.item_page;
    args.request.apply_to(&mut input);
    input
}

// ============================================================================
// Tests
// ============================================================================
