//! Text output formatting with colors.

use offerlens_core::{
    ErrorRecord, NormalizedEnvelope, NormalizedItem, NormalizedRecord, OfferLine,
};
use offerlens_fetch::{RecordOutcome, RunReport};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats one operation envelope.
    pub fn format_envelope(&self, envelope: &NormalizedEnvelope) -> String {
        let mut lines = Vec::new();

        // Header: "getItems (2 records)"
        let noun = if envelope.item_count == 1 {
            "record"
        } else {
            "records"
        };
        lines.push(format!(
            "{} {}",
            self.bold(&envelope.operation.to_string()),
            self.dim(&format!("({} {noun})", envelope.item_count))
        ));

        if let Some(error) = &envelope.processing_error {
            lines.push(format!("  {}", self.red(error)));
            lines.push(self.dim("  Raw response retained; rerun with --format json to inspect it"));
            return lines.join("\n");
        }

        for record in &envelope.items {
            match record {
                NormalizedRecord::Item(item) => self.push_item(&mut lines, item),
                NormalizedRecord::Node(node) => {
                    let id = node.id.as_deref().unwrap_or("-");
                    let name = node
                        .display_name
                        .as_deref()
                        .or(node.context_free_name.as_deref())
                        .unwrap_or("(unnamed node)");
                    let mut line = format!("  {:<12} {}", self.cyan(id), name);
                    if node.is_root == Some(true) {
                        line.push_str(&format!(" {}", self.dim("(root)")));
                    }
                    lines.push(line);
                }
            }
        }

        if let Some(meta) = &envelope.meta {
            if let Some(total) = meta.total_result_count {
                lines.push(self.dim(&format!("  {total} total results")));
            }
            if let Some(url) = &meta.search_url {
                lines.push(self.dim(&format!("  {url}")));
            }
        }

        lines.join("\n")
    }

    /// Formats a batch report: one block per record, then a summary line.
    pub fn format_report(&self, report: &RunReport) -> String {
        let mut blocks = Vec::new();

        for (index, outcome) in report.outcomes.iter().enumerate() {
            match outcome {
                RecordOutcome::Success(envelope) => {
                    blocks.push(format!(
                        "{} {}",
                        self.dim(&format!("[{index}]")),
                        self.format_envelope(envelope)
                    ));
                }
                RecordOutcome::Failure(record) => {
                    blocks.push(format!(
                        "{} {}",
                        self.dim(&format!("[{index}]")),
                        self.format_error(record)
                    ));
                }
            }
        }

        blocks.push(self.summary_line(report));
        blocks.join("\n")
    }

    /// Formats one failed record.
    fn format_error(&self, record: &ErrorRecord) -> String {
        let mut line = format!("{} {}", self.red("✗"), record.error);
        if let Some(debug) = &record.debug {
            if let Some(marketplace) = &debug.marketplace {
                line.push_str(&format!(" {}", self.dim(&format!("[{marketplace}]"))));
            }
        }
        line
    }

    /// The closing summary: "3 succeeded, 1 failed in 2.4s".
    fn summary_line(&self, report: &RunReport) -> String {
        let successes = report.success_count();
        let failures = report.failure_count();
        let succeeded = format!("{successes} succeeded");
        let failed = format!("{failures} failed");
        format!(
            "{}, {} in {:.1}s",
            if successes > 0 {
                self.green(&succeeded)
            } else {
                succeeded
            },
            if failures > 0 { self.red(&failed) } else { failed },
            report.duration.as_secs_f64()
        )
    }

    /// Appends the lines for one item.
    fn push_item(&self, lines: &mut Vec<String>, item: &NormalizedItem) {
        let asin = item.asin.as_deref().unwrap_or("-");
        let title = item.title.as_deref().unwrap_or("(no title)");
        lines.push(format!("  {:<12} {}", self.cyan(asin), title));

        if let Some(line) = self.price_line(item) {
            lines.push(format!("               {line}"));
        }
        if let Some(line) = self.brand_line(item) {
            lines.push(format!("               {}", self.dim(&line)));
        }
        if let Some(reviews) = &item.customer_reviews {
            if let Some(rating) = reviews.star_rating {
                let count = reviews
                    .count
                    .map(|count| format!(" ({count} reviews)"))
                    .unwrap_or_default();
                lines.push(format!(
                    "               {}",
                    self.dim(&format!("{rating}★{count}"))
                ));
            }
        }
        if let Some(url) = &item.detail_page_url {
            lines.push(format!("               {}", self.dim(url)));
        }
    }

    /// "Price: $49.99 (3 offers, 39.99–49.99)" from the buy-box offer and
    /// the derived summary, when present.
    fn price_line(&self, item: &NormalizedItem) -> Option<String> {
        let offers = item.offers.as_deref()?;
        let shown = offers
            .iter()
            .find(|offer| offer.is_buy_box_winner == Some(true))
            .or_else(|| offers.iter().find(|offer| offer.price.is_some()))?;
        let price = shown.price.as_deref()?;

        let mut line = format!("Price: {}", self.green(price));
        if let Some(basis) = strike_through(shown) {
            line.push_str(&format!(" {}", self.dim(&format!("(was {basis})"))));
        }
        if let Some(summary) = &item.price_summary {
            if summary.offer_count > 1 {
                line.push_str(&self.dim(&format!(
                    " ({} offers, {}–{})",
                    summary.offer_count, summary.lowest_price, summary.highest_price
                )));
            }
        }
        Some(line)
    }

    /// "Amazon · C78MP8" from whichever schema populated brand info.
    fn brand_line(&self, item: &NormalizedItem) -> Option<String> {
        let brand = item
            .by_line_info
            .as_ref()
            .and_then(|info| info.brand.as_deref())
            .or_else(|| {
                item.technical_info
                    .as_ref()
                    .and_then(|info| info.brand.as_deref())
            })?;
        let model = item
            .manufacture_info
            .as_ref()
            .and_then(|info| info.model.as_deref())
            .or_else(|| {
                item.technical_info
                    .as_ref()
                    .and_then(|info| info.model.as_deref())
            });
        Some(match model {
            Some(model) => format!("{brand} · {model}"),
            None => brand.to_string(),
        })
    }

    // ========================================================================
    // Color helpers
    // ========================================================================

    fn bold(&self, text: &str) -> String {
        self.wrap(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.wrap(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.wrap(GREEN, text)
    }

    fn red(&self, text: &str) -> String {
        self.wrap(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.wrap(CYAN, text)
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// The strike-through price differs per schema: `savingBasis` on the new
/// one, `savings` carrying `SavingBasis` on the legacy one.
fn strike_through(offer: &OfferLine) -> Option<&str> {
    offer
        .saving_basis
        .as_deref()
        .or(offer.savings.as_deref())
}
