//! Sequential run loop over a batch of operation inputs.
//!
//! Records are processed strictly in input order, one at a time, so output
//! position N always corresponds to input position N. A failure either
//! aborts the run or, in continue-on-fail mode, becomes a structured
//! [`ErrorRecord`] in the same slot a success would have occupied.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use offerlens_core::{ErrorRecord, NormalizedEnvelope, OperationInput};

use crate::context::RequestContext;
use crate::error::FetchError;
use crate::source::CatalogSource;

// ============================================================================
// Outcomes
// ============================================================================

/// The result slot for one input record.
///
/// Serialize-only, like the envelope it wraps: outcomes are emitted, never
/// parsed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordOutcome {
    /// The record was fetched and normalized.
    Success(NormalizedEnvelope),
    /// The record failed and the run was configured to continue.
    Failure(ErrorRecord),
}

impl RecordOutcome {
    /// Returns true for a successful outcome.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Per-record outcomes, in input order.
    pub outcomes: Vec<RecordOutcome>,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl RunReport {
    /// Number of successful records.
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of failed records.
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Drives a batch of inputs through one catalog source.
pub struct OperationPipeline {
    source: Box<dyn CatalogSource>,
    context: RequestContext,
}

impl OperationPipeline {
    /// Creates a pipeline over the given source and shared context.
    pub fn new(source: Box<dyn CatalogSource>, context: RequestContext) -> Self {
        Self { source, context }
    }

    /// The source this pipeline queries.
    pub fn source(&self) -> &dyn CatalogSource {
        self.source.as_ref()
    }

    /// Processes every input in order.
    ///
    /// Without continue-on-fail the first failure aborts the whole run and
    /// the error carries whatever status and body the upstream returned.
    /// With it, failures become [`ErrorRecord`]s and later records still
    /// run, each against the shared token cache.
    #[instrument(skip(self, inputs), fields(source = self.source.id(), records = inputs.len()))]
    pub async fn run(&self, inputs: &[OperationInput]) -> Result<RunReport, FetchError> {
        let started = Instant::now();
        let settings = self.context.settings();
        let mut outcomes = Vec::with_capacity(inputs.len());

        for (index, input) in inputs.iter().enumerate() {
            match self.source.execute(&self.context, input).await {
                Ok(envelope) => {
                    debug!(index, item_count = envelope.item_count, "record normalized");
                    outcomes.push(RecordOutcome::Success(envelope));
                }
                Err(err) => {
                    if !settings.continue_on_fail {
                        return Err(err);
                    }
                    warn!(index, "record failed: {err}");
                    outcomes.push(RecordOutcome::Failure(ErrorRecord {
                        error: err.to_string(),
                        status: err.status(),
                        response: err.response_body().cloned(),
                        debug: settings.debug.then(|| self.source.debug_context()),
                    }));
                }
            }
        }

        debug!(
            successes = outcomes.iter().filter(|o| o.is_success()).count(),
            "run finished"
        );
        Ok(RunReport {
            outcomes,
            duration: started.elapsed(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
