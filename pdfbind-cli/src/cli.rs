//! CLI argument parsing for pdfbind.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.

use clap::Parser;
use std::path::PathBuf;

use pdfbind::config::{Config, DEFAULT_SIGNATURE_SIZE, OverwriteMode};
use pdfbind::error::{PdfBindError, Result};
use pdfbind::utils::collect_paths_for_patterns;

/// Reorder PDF pages into printable signatures for section binding.
///
/// pdfbind rearranges the pages of a PDF so that, printed double-sided and
/// folded into nested signatures, the resulting booklet reads in correct
/// order. Each input produces its own reordered output file.
#[derive(Parser, Debug)]
#[command(name = "pdfbind")]
#[command(version)]
#[command(about = "Reorder PDF pages into printable signatures", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files to reorder
    ///
    /// Each input produces its own output file named
    /// <name>_section_bound.pdf unless --output is given.
    ///
    /// Examples:
    ///   pdfbind book.pdf
    ///   pdfbind book.pdf -s 16 -o booklet.pdf
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path
    ///
    /// Only valid with a single input file. By default the output is
    /// written next to the input with a _section_bound suffix.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pages per signature (must be a multiple of 4)
    ///
    /// Each sheet of paper holds 4 pages, so the signature size divided
    /// by 4 is the number of sheets you fold together.
    /// Common sizes: 4, 8, 16, 32, 40.
    #[arg(short = 's', long, value_name = "PAGES", default_value_t = DEFAULT_SIGNATURE_SIZE)]
    pub signature_size: usize,

    /// Dry run - validate inputs and preview without creating output
    ///
    /// Validates that all input files are readable PDFs, then displays
    /// what the reordering would produce without writing anything.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Emit the dry-run report as JSON
    ///
    /// Machine-readable output for scripts. Only available together
    /// with --dry-run.
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Verbose output - show detailed information and statistics
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of existing output files without confirmation
    ///
    /// By default, pdfbind will prompt before overwriting an existing
    /// file. Use this flag to skip the confirmation prompt.
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output files
    ///
    /// If an output file already exists, exit with an error instead of
    /// prompting or overwriting.
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    /// Useful for scripts and automation.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Continue processing even if some PDFs fail
    ///
    /// By default, pdfbind stops on the first error. With this flag,
    /// problematic PDFs are skipped with a warning and processing
    /// continues with the remaining files.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Number of inputs to process concurrently
    ///
    /// Default is the number of CPU cores. Use 1 for sequential
    /// processing.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Expand glob patterns into additional inputs
    ///
    /// Useful on shells without glob expansion.
    ///
    /// Example:
    ///   pdfbind --glob 'chapters/*.pdf' cover.pdf
    #[arg(long, value_name = "PATTERN")]
    pub glob: Vec<String>,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Arguments
    ///
    /// * `inputs` - The fully expanded input list (see
    ///   [`Cli::expand_inputs`])
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is inconsistent.
    pub fn to_config(&self, inputs: Vec<PathBuf>) -> Result<Config> {
        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = Config {
            inputs,
            output: self.output.clone(),
            signature_size: self.signature_size,
            dry_run: self.dry_run,
            json: self.json,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode,
            continue_on_error: self.continue_on_error,
            jobs: self.jobs,
        };

        config
            .validate()
            .map_err(|e| PdfBindError::invalid_config(e.to_string()))?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Performs early validation that doesn't require file I/O:
    /// - Signature size shape
    /// - Numeric ranges
    ///
    /// # Errors
    ///
    /// Returns an error if any validation check fails.
    pub fn validate(&self) -> Result<()> {
        if self.signature_size < 4 || self.signature_size % 4 != 0 {
            return Err(PdfBindError::invalid_signature_size(self.signature_size));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(PdfBindError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        Ok(())
    }

    /// Get all input paths including those from glob patterns.
    ///
    /// Paths from patterns are appended after direct inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is invalid or no inputs remain.
    pub fn expand_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut all_inputs = self.inputs.clone();
        all_inputs.extend(collect_paths_for_patterns(&self.glob)?);

        if all_inputs.is_empty() {
            return Err(PdfBindError::NoInputs);
        }

        Ok(all_inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_cli(inputs: Vec<&str>) -> Cli {
        Cli {
            inputs: inputs.iter().map(PathBuf::from).collect(),
            output: None,
            signature_size: DEFAULT_SIGNATURE_SIZE,
            dry_run: false,
            json: false,
            verbose: false,
            force: false,
            no_clobber: false,
            quiet: false,
            continue_on_error: false,
            jobs: None,
            glob: Vec::new(),
        }
    }

    #[test]
    fn test_basic_cli_to_config() {
        let cli = create_test_cli(vec!["a.pdf", "b.pdf"]);
        let inputs = cli.expand_inputs().unwrap();
        let config = cli.to_config(inputs).unwrap();

        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.signature_size, 8);
        assert!(!config.dry_run);
        assert!(!config.verbose);
    }

    #[test]
    fn test_cli_overwrite_modes() {
        let mut cli = create_test_cli(vec!["a.pdf"]);

        // Default mode
        let config = cli.to_config(cli.inputs.clone()).unwrap();
        assert_eq!(config.overwrite_mode, OverwriteMode::Prompt);

        // Force mode
        cli.force = true;
        let config = cli.to_config(cli.inputs.clone()).unwrap();
        assert_eq!(config.overwrite_mode, OverwriteMode::Force);

        // No clobber mode
        cli.force = false;
        cli.no_clobber = true;
        let config = cli.to_config(cli.inputs.clone()).unwrap();
        assert_eq!(config.overwrite_mode, OverwriteMode::NoClobber);
    }

    #[test]
    fn test_cli_json_requires_dry_run() {
        let mut cli = create_test_cli(vec!["a.pdf"]);
        cli.json = true;

        assert!(cli.to_config(cli.inputs.clone()).is_err());

        cli.dry_run = true;
        assert!(cli.to_config(cli.inputs.clone()).is_ok());
    }

    #[test]
    fn test_cli_with_output_and_multiple_inputs() {
        let mut cli = create_test_cli(vec!["a.pdf", "b.pdf"]);
        cli.output = Some(PathBuf::from("out.pdf"));

        assert!(cli.to_config(cli.inputs.clone()).is_err());
    }

    #[test]
    fn test_cli_validate_signature_size() {
        let mut cli = create_test_cli(vec!["a.pdf"]);

        cli.signature_size = 15;
        assert!(matches!(
            cli.validate(),
            Err(PdfBindError::InvalidSignatureSize { size: 15, .. })
        ));

        cli.signature_size = 0;
        assert!(cli.validate().is_err());

        cli.signature_size = 16;
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_validate_zero_jobs() {
        let mut cli = create_test_cli(vec!["a.pdf"]);
        cli.jobs = Some(0);

        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_expand_inputs_no_globs() {
        let cli = create_test_cli(vec!["a.pdf", "b.pdf"]);
        let inputs = cli.expand_inputs().unwrap();

        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0], PathBuf::from("a.pdf"));
        assert_eq!(inputs[1], PathBuf::from("b.pdf"));
    }

    #[test]
    fn test_expand_inputs_with_glob() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::File::create(dir.path().join("x.pdf")).unwrap();
        std::fs::File::create(dir.path().join("y.pdf")).unwrap();

        let mut cli = create_test_cli(vec!["cover.pdf"]);
        cli.glob = vec![format!("{}/*.pdf", dir.path().display())];

        let inputs = cli.expand_inputs().unwrap();
        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[0], PathBuf::from("cover.pdf"));
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
