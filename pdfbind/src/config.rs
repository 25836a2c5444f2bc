//! Configuration module for pdfbind.
//!
//! This module transforms CLI arguments into a validated, normalized
//! configuration that drives the section-binding process. It handles:
//! - Validation of argument combinations
//! - Resolution of conflicting options
//! - Application of defaults
//! - Derivation of output paths

use anyhow::{Result, bail};

use crate::PdfBindError;
use std::path::{Path, PathBuf};

/// Default pages per signature (2 sheets of paper).
pub const DEFAULT_SIGNATURE_SIZE: usize = 8;

/// Largest accepted signature size.
///
/// Beyond 32 sheets per signature the fold gets too thick to bind well.
pub const MAX_SIGNATURE_SIZE: usize = 128;

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for a section-binding run.
///
/// This structure contains all settings needed to reorder one or more
/// documents, derived and validated from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input PDF file paths (each produces its own output).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path; only valid with a single input.
    ///
    /// When `None`, the output path is derived from each input's name.
    pub output: Option<PathBuf>,

    /// Pages per signature (positive multiple of 4).
    pub signature_size: usize,

    /// Dry run mode - validate and report without creating output.
    pub dry_run: bool,

    /// Emit the dry-run report as JSON instead of formatted text.
    pub json: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Continue with remaining inputs when one fails.
    pub continue_on_error: bool,

    /// Number of inputs to process concurrently (None = auto-detect).
    pub jobs: Option<usize>,
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// Checks for logical inconsistencies and invalid combinations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - The signature size is not a usable multiple of 4
    /// - An explicit output is combined with multiple inputs
    /// - Jobs count is zero
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!(PdfBindError::NoInputs);
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.json && !self.dry_run {
            bail!("--json is only available together with --dry-run");
        }

        if self.signature_size < 4 || self.signature_size % 4 != 0 {
            bail!(PdfBindError::invalid_signature_size(self.signature_size));
        }

        if self.signature_size > MAX_SIGNATURE_SIZE {
            bail!(
                "Signature size too large: {} (maximum {}). \
                 Large signatures are hard to fold and bind poorly",
                self.signature_size,
                MAX_SIGNATURE_SIZE
            );
        }

        if self.output.is_some() && self.inputs.len() > 1 {
            bail!("--output can only be used with a single input file");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        // Validate that no input would be overwritten by its own output
        for input in &self.inputs {
            let output = self.output_path_for(input);
            if *input == output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    output.display()
                );
            }
        }

        Ok(())
    }

    /// Resolve the output path for a given input.
    ///
    /// Uses the explicit `--output` path when present, otherwise derives
    /// `<stem>_section_bound.pdf` next to the input.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        match &self.output {
            Some(output) => output.clone(),
            None => default_output_path(input),
        }
    }

    /// Get the effective number of concurrent jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if
    /// auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            signature_size: DEFAULT_SIGNATURE_SIZE,
            dry_run: false,
            json: false,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::Prompt,
            continue_on_error: false,
            jobs: None,
        }
    }
}

/// Derive the default output path for an input file.
///
/// `book.pdf` becomes `book_section_bound.pdf` in the same directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    input.with_file_name(format!("{stem}_section_bound.pdf"))
}
