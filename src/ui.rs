use console::style;
use serde::{Deserialize, Serialize};

use crate::commands::Report;
use crate::error::Result;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `key: value` lines for people
    #[default]
    Console,
    /// A single JSON object
    Json,
    /// Bare values, one per line
    Text,
}

/// Render a command report in the requested format.
pub fn format_report(report: &Report, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(report)?,
        OutputFormat::Text => report.values().cloned().collect::<Vec<_>>().join("\n"),
        OutputFormat::Console => report
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(rendered)
}

pub fn display_report(report: &Report, format: OutputFormat) -> Result<()> {
    println!("{}", format_report(report, format)?);
    Ok(())
}

/// Print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}
