//! Sources command - list the available catalog sources.

use anyhow::Result;

use offerlens_providers::SourceRegistry;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Runs the sources command.
pub fn run(cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            for descriptor in SourceRegistry::all() {
                println!(
                    "{:<10} {:<20} {}",
                    descriptor.kind, descriptor.display_name, descriptor.summary
                );
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_sources(SourceRegistry::all())?);
        }
    }
    Ok(())
}
