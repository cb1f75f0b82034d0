//! Browse command - fetch catalog taxonomy nodes.

use anyhow::Result;
use clap::Args;

use offerlens_core::{ListInput, Operation, OperationInput};

use crate::commands::request::{execute_single, render_envelope, RequestArgs};
use crate::config::Config;
use crate::Cli;

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Browse node identifiers. Comma-separated values work too.
    #[arg(required = true)]
    pub ids: Vec<String>,

    #[command(flatten)]
    pub request: RequestArgs,
}

/// Runs the browse command.
pub async fn run(args: &BrowseArgs, cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let kind = config.resolve_source(cli.source.as_deref())?;

    let envelope = execute_single(&config, kind, build_input(args), &args.request).await?;
    render_envelope(&envelope, cli)
}

/// Builds the operation input from the parsed arguments.
fn build_input(args: &BrowseArgs) -> OperationInput {
    let mut input = OperationInput::new(Operation::GetBrowseNodes);
    input.browse_node_ids = Some(ListInput::Csv(args.ids.join(",")));
    args.request.apply_to(&mut input);
    input
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_input_collects_node_ids() {
        let args = BrowseArgs {
            ids: vec!["283155".to_string(), "1000,2000".to_string()],
            request: RequestArgs::default(),
        };
        let input = build_input(&args);
        assert_eq!(input.operation(), Operation::GetBrowseNodes);
        assert_eq!(
            input.normalized_browse_node_ids(),
            vec!["283155", "1000", "2000"]
        );
        assert!(input.normalized_item_ids().is_empty());
    }
}
