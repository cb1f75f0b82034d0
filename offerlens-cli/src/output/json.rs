//! JSON output formatting.
//!
//! Envelopes and error records already serialize into their wire shape, so
//! the JSON formatter mostly decides between compact and pretty printing.
//! The batch report serializes as a plain array of per-record outcomes so
//! output position N corresponds to input position N.

use anyhow::Result;
use serde::Serialize;

use offerlens_fetch::RunReport;
use offerlens_providers::SourceDescriptor;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a source listing entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOutput {
    pub source: String,
    pub display_name: String,
    pub summary: String,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a batch report as an array of per-record outcomes.
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        self.format(&report.outcomes)
    }

    /// Formats the source listing.
    pub fn format_sources(&self, sources: &[SourceDescriptor]) -> Result<String> {
        let outputs: Vec<SourceOutput> = sources
            .iter()
            .map(|descriptor| SourceOutput {
                source: descriptor.kind.as_str().to_string(),
                display_name: descriptor.display_name.to_string(),
                summary: descriptor.summary.to_string(),
            })
            .collect();
        self.format(&outputs)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_format_sources_wire_keys() {
        use offerlens_providers::SourceRegistry;

        let formatter = JsonFormatter::new(false);
        let output = formatter.format_sources(SourceRegistry::all()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["source"], "creators");
        assert_eq!(parsed[1]["source"], "paapi");
        assert!(parsed[0].get("displayName").is_some());
    }
}
