//! pdfbind - Reorder PDF pages into printable signatures.
//!
//! A CLI tool that rearranges PDF pages so that double-sided sheets, folded
//! and nested into signatures, read in correct order.

mod cli;

use clap::Parser;
use std::path::Path;
use std::process;

use crate::cli::Cli;
use pdfbind::bind::{BindResult, Binder, plan_signatures};
use pdfbind::config::{Config, OverwriteMode};
use pdfbind::error::PdfBindError;
use pdfbind::io::PdfWriter;
use pdfbind::output::{
    DryRunReport, OutputFormatter, ProgressBar, ProgressStyle, display_bind_statistics,
    display_binding_instructions, display_validation_summary, render_dry_run_json,
};
use pdfbind::validation::{ValidationSummary, Validator};

/// Documents below this page count don't get a progress bar.
const PROGRESS_THRESHOLD: usize = 50;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfBindError> {
    // Validate CLI arguments
    cli.validate()?;

    // Expand glob patterns into the final input list
    let inputs = cli.expand_inputs()?;
    let config = cli.to_config(inputs)?;

    // Create output formatter
    let formatter = OutputFormatter::from_config(&config);

    // Print header
    if formatter.should_print() && !config.json {
        formatter.section(&format!("{} v{}", pdfbind::NAME, pdfbind::VERSION));
        formatter.blank_line();
    }

    // Validate configuration and inputs
    if !config.json {
        formatter.info("Validating input files...");
    }
    let validator = Validator::new();
    let validation_summary = validator.validate_config(&config).await?;

    if formatter.should_print() && !config.json {
        display_validation_summary(&formatter, &validation_summary);
    }

    // Dry run mode - report what would happen and stop
    if config.dry_run {
        report_dry_run(&config, &formatter, &validation_summary)?;
        return Ok(());
    }

    // Perform the binding
    formatter.blank_line();
    formatter.info("Reordering pages for section binding...");

    let binder = Binder::new();
    let results = if let [input] = config.inputs.as_slice() {
        let page_count = validation_summary.results[0].page_count;
        vec![bind_single(&binder, input, &config, page_count).await?]
    } else {
        binder.bind_all(&config).await?
    };

    // Write every output, prompting for overwrites as configured
    let writer = PdfWriter::new();
    for result in &results {
        let output = config.output_path_for(&result.input);
        handle_output_overwrite(&output, &config, &formatter).await?;

        let write_stats = writer.save_with_stats(&result.document, &output).await?;

        formatter.success(&format!(
            "Created {} ({}, {} pages)",
            output.display(),
            write_stats.format_file_size(),
            result.statistics.output_pages
        ));

        if formatter.is_verbose() {
            display_bind_statistics(&formatter, &result.statistics);
            formatter.detail(
                "Write time",
                &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
            );
        }
    }

    // Every input shares the signature geometry, so one set of
    // instructions covers them all.
    if let Some(result) = results.first()
        && formatter.should_print()
    {
        display_binding_instructions(&formatter, &result.statistics);
    }

    Ok(())
}

/// Bind one document, showing a progress bar for large ones.
async fn bind_single(
    binder: &Binder,
    input: &Path,
    config: &Config,
    page_count: usize,
) -> Result<BindResult, PdfBindError> {
    let show_progress = config.should_print() && page_count > PROGRESS_THRESHOLD;

    if !show_progress {
        return binder.bind_file(input, config).await;
    }

    let plan = plan_signatures(page_count, config.signature_size)?;
    let mut progress = ProgressBar::new(plan.len(), ProgressStyle::Bar);
    progress.set_message("Reordering");

    let result = binder
        .bind_file_with_progress(input, config, |processed, _| progress.update(processed))
        .await;

    match &result {
        Ok(_) => progress.finish(),
        Err(_) => progress.clear(),
    }

    result
}

/// Report what a real run would do, without creating anything.
fn report_dry_run(
    config: &Config,
    formatter: &OutputFormatter,
    summary: &ValidationSummary,
) -> Result<(), PdfBindError> {
    if config.json {
        let mut reports = Vec::with_capacity(summary.results.len());
        for result in &summary.results {
            let plan = plan_signatures(result.page_count, config.signature_size)?;
            let output = config.output_path_for(&result.path);
            reports.push(DryRunReport::new(&result.path, output, &plan));
        }

        println!("{}", render_dry_run_json(&reports)?);
        return Ok(());
    }

    formatter.blank_line();
    formatter.success("Dry run completed successfully");

    for result in &summary.results {
        let plan = plan_signatures(result.page_count, config.signature_size)?;
        let output = config.output_path_for(&result.path);

        formatter.info(&format!(
            "  {} -> {}",
            result.path.display(),
            output.display()
        ));
        formatter.info(&format!(
            "    {} pages into {} signature(s), {} sheet(s) of paper, {} blank page(s)",
            result.page_count,
            plan.signature_count(),
            plan.total_sheets(),
            plan.blank_count()
        ));
    }

    formatter.info("  Run without --dry-run to create the reordered PDF");
    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    output: &Path,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), PdfBindError> {
    // Check if output exists
    if !output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => {
            // Just overwrite, no questions asked
            Ok(())
        }
        OverwriteMode::NoClobber => {
            // Error if file exists
            Err(PdfBindError::output_exists(output.to_path_buf()))
        }
        OverwriteMode::Prompt => {
            // Ask user for confirmation
            if formatter.is_quiet() {
                // In quiet mode, treat as no-clobber
                return Err(PdfBindError::output_exists(output.to_path_buf()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                output.display()
            ));

            // Simple yes/no prompt
            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfBindError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfBindError::Cancelled)
            }
        }
    }
}
