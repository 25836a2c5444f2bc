//! Output formatting and display for pdfbind.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Progress indicators
//! - Binding statistics and instructions
//! - Quiet and verbose modes

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::{ProgressBar, ProgressStyle};

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::bind::{BindStatistics, ImpositionPlan};
use crate::config::Config;
use crate::error::PdfBindError;
use crate::validation::ValidationSummary;

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Display validation summary to the user.
pub fn display_validation_summary(formatter: &OutputFormatter, summary: &ValidationSummary) {
    if summary.files_failed > 0 {
        formatter.warning(&format!(
            "Warning: {} file(s) failed validation",
            summary.files_failed
        ));
    }

    formatter.info(&format!(
        "Validated {} file(s): {} pages, {}",
        summary.files_validated,
        summary.total_pages,
        summary.format_total_size()
    ));
}

/// Display signature statistics for one bound document.
pub fn display_bind_statistics(formatter: &OutputFormatter, stats: &BindStatistics) {
    formatter.detail("Source pages", &stats.total_pages.to_string());
    formatter.detail(
        "Output pages",
        &format!("{} ({} blank)", stats.output_pages, stats.blank_pages),
    );
    formatter.detail("Signature size", &format!("{} pages", stats.signature_size));
    formatter.detail(
        "Sheets per signature",
        &stats.sheets_per_signature.to_string(),
    );
    formatter.detail("Signatures", &stats.signature_count.to_string());
    formatter.detail("Sheets needed", &stats.total_sheets.to_string());
    formatter.detail("Input size", &stats.format_input_size());
    formatter.detail(
        "Load time",
        &format!("{:.2}s", stats.load_time.as_secs_f64()),
    );
    formatter.detail(
        "Bind time",
        &format!("{:.2}s", stats.bind_time.as_secs_f64()),
    );
}

/// Machine-readable dry-run projection for one input.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunReport {
    /// Path of the source file.
    pub input: PathBuf,

    /// Path the output would be written to.
    pub output: PathBuf,

    /// Number of pages in the source document.
    pub total_pages: usize,

    /// Number of pages the output would have.
    pub output_pages: usize,

    /// Number of blank padding pages.
    pub blank_pages: usize,

    /// Pages per signature.
    pub signature_size: usize,

    /// Physical sheets of paper per signature.
    pub sheets_per_signature: usize,

    /// Number of signatures.
    pub signature_count: usize,

    /// Total sheets of paper needed.
    pub total_sheets: usize,
}

impl DryRunReport {
    /// Build a report from a plan and the paths it applies to.
    pub fn new(input: &Path, output: PathBuf, plan: &ImpositionPlan) -> Self {
        Self {
            input: input.to_path_buf(),
            output,
            total_pages: plan.total_pages(),
            output_pages: plan.len(),
            blank_pages: plan.blank_count(),
            signature_size: plan.signature_size(),
            sheets_per_signature: plan.sheets_per_signature(),
            signature_count: plan.signature_count(),
            total_sheets: plan.total_sheets(),
        }
    }
}

/// Render dry-run reports as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_dry_run_json(reports: &[DryRunReport]) -> crate::Result<String> {
    serde_json::to_string_pretty(reports).map_err(|e| PdfBindError::other(e.to_string()))
}

/// Display printing and binding instructions.
///
/// Suppressed in quiet mode, like all informational output.
pub fn display_binding_instructions(formatter: &OutputFormatter, stats: &BindStatistics) {
    formatter.section("Printing & binding steps");
    formatter.list_item(1, "Print the output PDF double-sided (flip on the long edge)");
    formatter.list_item(
        2,
        &format!(
            "Every {} sheet(s) of paper forms one signature ({} in total)",
            stats.sheets_per_signature, stats.signature_count
        ),
    );
    formatter.list_item(3, "Fold each signature in half along its center");
    formatter.list_item(4, "Stack the folded signatures in order");
    formatter.list_item(5, "Bind along the folded edge (staple, sew, or glue)");
}
