//! Shared request plumbing for the single-record commands.

use std::time::Duration;

use anyhow::Result;
use clap::Args;

use offerlens_core::{normalize_list, ListInput, NormalizedEnvelope, OperationInput};
use offerlens_fetch::{OperationPipeline, RecordOutcome, RequestContext, RunSettings};
use offerlens_providers::SourceKind;

use crate::config::Config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Request options shared by the items, search, and browse commands.
///
/// Every option is sent upstream only when given; omitted flags never
/// appear in the request body.
#[derive(Args, Default)]
pub struct RequestArgs {
    /// Response fields to request, comma-separated
    /// (e.g. "itemInfo.title,offersV2.listings.price").
    #[arg(long)]
    pub resources: Option<String>,

    /// Condition filter (e.g. "New").
    #[arg(long)]
    pub condition: Option<String>,

    /// Preferred currency code (e.g. "EUR").
    #[arg(long)]
    pub currency: Option<String>,

    /// Preferred locales, comma-separated (Creators API).
    #[arg(long)]
    pub languages: Option<String>,

    /// Preferred locale, single value (PA-API).
    #[arg(long)]
    pub language: Option<String>,

    /// Merchant filter (PA-API).
    #[arg(long)]
    pub merchant: Option<String>,

    /// Retries for throttled or failed requests (0-8).
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=8))]
    pub max_retries: Option<u32>,

    /// Base retry delay in milliseconds (100-10000).
    #[arg(long, value_parser = clap::value_parser!(u64).range(100..=10000))]
    pub retry_delay_ms: Option<u64>,

    /// Request timeout in seconds.
    #[arg(long, default_value = "60")]
    pub timeout: u64,

    /// Attach redacted credential context to failures.
    #[arg(long)]
    pub debug: bool,
}

impl RequestArgs {
    /// Copies the optional fields onto an operation input.
    pub fn apply_to(&self, input: &mut OperationInput) {
        if let Some(resources) = &self.resources {
            input.resources = Some(normalize_list(resources));
        }
        input.options.condition = self.condition.clone();
        input.options.currency_of_preference = self.currency.clone();
        input.options.languages_of_preference = self.languages.clone().map(ListInput::Csv);
        input.options.language_of_preference = self.language.clone();
        input.options.merchant = self.merchant.clone();
        input.options.max_retries = self.max_retries;
        input.options.retry_delay_ms = self.retry_delay_ms;
    }

    /// Run settings for a single-record command.
    pub fn settings(&self) -> RunSettings {
        RunSettings::default()
            .with_debug(self.debug)
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

/// Runs one input through the selected source and returns its envelope.
pub async fn execute_single(
    config: &Config,
    kind: SourceKind,
    input: OperationInput,
    args: &RequestArgs,
) -> Result<NormalizedEnvelope> {
    let source = config.build_source(kind)?;
    let context = RequestContext::builder().settings(args.settings()).build()?;
    let pipeline = OperationPipeline::new(source, context);

    let report = pipeline.run(std::slice::from_ref(&input)).await?;
    match report.outcomes.into_iter().next() {
        Some(RecordOutcome::Success(envelope)) => Ok(envelope),
        _ => anyhow::bail!("The run produced no output"),
    }
}

/// Prints an envelope in the selected output format.
pub fn render_envelope(envelope: &NormalizedEnvelope, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_envelope(envelope));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(envelope)?);
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
