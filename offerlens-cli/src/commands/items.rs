//! Items command - fetch catalog items by ASIN.

use anyhow::Result;
use clap::Args;

use offerlens_core::{ListInput, Operation, OperationInput};

use crate::commands::request::{execute_single, render_envelope, RequestArgs};
use crate::config::Config;
use crate::Cli;

/// Arguments for the items command.
#[derive(Args)]
pub struct ItemsArgs {
    /// Item identifiers (ASINs). Comma-separated values work too.
    #[arg(required = true)]
    pub ids: Vec<String>,

    #[command(flatten)]
    pub request: RequestArgs,
}

/// Runs the items command.
pub async fn run(args: &ItemsArgs, cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let kind = config.resolve_source(cli.source.as_deref())?;

    let envelope = execute_single(&config, kind, build_input(args), &args.request).await?;
    render_envelope(&envelope, cli)
}

/// Builds the operation input from the parsed arguments.
fn build_input(args: &ItemsArgs) -> OperationInput {
    let mut input = OperationInput::new(Operation::GetItems);
    // Joining keeps both invocation forms working: space-separated
    // arguments and a single comma-separated one.
    input.item_ids = Some(ListInput::Csv(args.ids.join(",")));
    args.request.apply_to(&mut input);
    input
}

// ============================================================================
// Tests
// ============================================================================
