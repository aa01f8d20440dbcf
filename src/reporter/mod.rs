//! Report builder - local rendering of audit results
//!
//! Renders the dispatcher's result list as console output, JSON, or XML.
//! The result list is borrowed and never mutated, so the same list feeds
//! both the local report and the remote submission.

mod xml;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::audit::{CheckResult, CheckStatus};
use crate::ui::{OutputMode, Printer};

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    Json,
    Xml,
    /// Per-result console rendering
    #[default]
    Console,
}

impl ReportFormat {
    /// Anything that is not json or xml falls back to console output.
    pub fn from_selector(selector: &str) -> Self {
        match selector.to_lowercase().as_str() {
            "json" => ReportFormat::Json,
            "xml" => ReportFormat::Xml,
            _ => ReportFormat::Console,
        }
    }
}

/// Pass/fail/error tallies for the summary line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

/// JSON envelope written for `--output json`
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    tool: &'static str,
    version: &'static str,
    generated: String,
    results: &'a [CheckResult],
}

/// Report over one run's results
pub struct Report<'a> {
    results: &'a [CheckResult],
}

impl<'a> Report<'a> {
    pub fn new(results: &'a [CheckResult]) -> Self {
        Self { results }
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary::default();
        for result in self.results {
            match result.status {
                CheckStatus::Pass => summary.passed += 1,
                CheckStatus::Fail => summary.failed += 1,
                CheckStatus::Error => summary.errors += 1,
            }
        }
        summary
    }

    pub fn to_json(&self) -> Result<String> {
        let envelope = JsonReport {
            tool: "dockaudit",
            version: env!("CARGO_PKG_VERSION"),
            generated: chrono::Utc::now().to_rfc3339(),
            results: self.results,
        };
        serde_json::to_string_pretty(&envelope).context("serializing report")
    }

    pub fn to_xml(&self) -> String {
        xml::render(self.results, &chrono::Utc::now().to_rfc3339())
    }

    /// Print the report to stdout in the selected format.
    pub fn print(&self, format: ReportFormat) -> Result<()> {
        match format {
            ReportFormat::Json => println!("{}", self.to_json()?),
            ReportFormat::Xml => print!("{}", self.to_xml()),
            ReportFormat::Console => self.print_console(OutputMode::detect()),
        }
        Ok(())
    }

    /// Per-result console rendering with a summary line.
    pub fn print_console(&self, mode: OutputMode) {
        let printer = Printer::with_mode(mode);

        printer.header("Audit Results");
        printer.separator();

        for result in self.results {
            if result.output.is_empty() {
                printer.println(&format!(
                    "  [{}] {}",
                    result.status.display(mode),
                    result.name
                ));
            } else {
                printer.println(&format!(
                    "  [{}] {} - {}",
                    result.status.display(mode),
                    result.name,
                    result.output
                ));
            }
        }

        printer.separator();
        let summary = self.summary();
        printer.println(&format!(
            "Summary: {} passed, {} failed, {} errors",
            summary.passed, summary.failed, summary.errors
        ));
        if summary.failed > 0 {
            printer.warning("Target has benchmark findings to address.");
        } else if summary.errors > 0 {
            printer.warning("Some checks could not evaluate the target.");
        } else {
            printer.success("All checks passed.");
        }
    }

    /// Write the rendered report to a file.
    pub fn write_file(&self, path: &Path, format: ReportFormat) -> Result<()> {
        let rendered = match format {
            ReportFormat::Json => self.to_json()?,
            ReportFormat::Xml => self.to_xml(),
            // A file target with the default selector still gets a
            // machine-readable document.
            ReportFormat::Console => self.to_json()?,
        };
        fs::write(path, rendered).with_context(|| format!("writing report to {}", path.display()))
    }
}
