//! Run command - process a batch file of operation inputs.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use offerlens_core::OperationInput;
use offerlens_fetch::{OperationPipeline, RequestContext, RunReport, RunSettings};

use crate::config::Config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Batch file: a JSON array of operation inputs. Use "-" for stdin.
    pub file: PathBuf,

    /// Emit a structured error record per failed input instead of
    /// aborting the run on the first failure.
    #[arg(long)]
    pub continue_on_fail: bool,

    /// Attach redacted credential context to error records.
    #[arg(long)]
    pub debug: bool,

    /// Request timeout in seconds.
    #[arg(long, default_value = "60")]
    pub timeout: u64,
}

/// Runs the run command.
pub async fn run(args: &RunArgs, cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let kind = config.resolve_source(cli.source.as_deref())?;
    let inputs = read_inputs(&args.file)?;

    info!(records = inputs.len(), source = %kind, "starting batch run");

    let settings = RunSettings::default()
        .with_continue_on_fail(args.continue_on_fail)
        .with_debug(args.debug)
        .with_timeout(Duration::from_secs(args.timeout));
    let source = config.build_source(kind)?;
    let context = RequestContext::builder().settings(settings).build()?;
    let pipeline = OperationPipeline::new(source, context);

    let report = pipeline.run(&inputs).await?;
    output_report(&report, cli)?;

    if !report.outcomes.is_empty() && report.success_count() == 0 {
        std::process::exit(ExitCode::RequestFailed as i32);
    }

    Ok(())
}

/// Reads the batch inputs from a file or stdin.
fn read_inputs(path: &Path) -> Result<Vec<OperationInput>> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read batch input from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file {}", path.display()))?
    };
    parse_inputs(&raw)
}

/// Parses a JSON array of operation inputs.
fn parse_inputs(raw: &str) -> Result<Vec<OperationInput>> {
    serde_json::from_str(raw).context("Batch input must be a JSON array of operation inputs")
}

/// Outputs the report in the selected format.
fn output_report(report: &RunReport, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_report(report));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_report(report)?);
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use offerlens_core::Operation;

    #[test]
    fn test_parse_inputs_accepts_both_id_shapes() {
        let inputs = parse_inputs(
            r#"[
                { "operation": "getItems", "itemIds": "B08N5WRWNW, B07XJ8C8F5" },
                { "operation": "getItems", "itemIds": ["B0C1234567"] }
            ]"#,
        )
        .unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(
            inputs[0].normalized_item_ids(),
            vec!["B08N5WRWNW", "B07XJ8C8F5"]
        );
        assert_eq!(inputs[1].normalized_item_ids(), vec!["B0C1234567"]);
    }

    #[test]
    fn test_parse_inputs_defaults_missing_operation() {
        let inputs = parse_inputs(r#"[ { "itemIds": "B08N5WRWNW" } ]"#).unwrap();
        assert_eq!(inputs[0].operation(), Operation::GetItems);
    }

    #[test]
    fn test_parse_inputs_reads_additional_fields() {
        let inputs = parse_inputs(
            r#"[{
                "operation": "searchItems",
                "keywords": "usb hub",
                "itemCount": 5,
                "additionalFields": { "itemPage": 2, "maxRetries": 4 }
            }]"#,
        )
        .unwrap();
        assert_eq!(inputs[0].item_count, Some(5));
        assert_eq!(inputs[0].options.item_page, Some(2));
        assert_eq!(inputs[0].options.max_retries, Some(4));
    }

    #[test]
    fn test_parse_inputs_rejects_non_array() {
        let err = parse_inputs(r#"{ "operation": "getItems" }"#).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }
}
