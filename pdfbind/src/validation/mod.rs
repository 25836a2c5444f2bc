//! Input validation for pdfbind.
//!
//! This module provides comprehensive validation of PDF files and
//! configuration before a binding run begins. It performs:
//! - File existence and accessibility checks
//! - PDF format validation
//! - Encryption detection
//! - Page count verification
//! - Signature size checks with suggestions
//! - Output path validation
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::validation::Validator;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let result = validator.validate_file(&PathBuf::from("book.pdf")).await?;
//! println!("PDF has {} pages", result.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{Config, MAX_SIGNATURE_SIZE, OverwriteMode};
use crate::error::{PdfBindError, Result};
use crate::utils::format_file_size;

/// Result of validating a single PDF file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: usize,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Number of objects in the PDF.
    pub object_count: usize,

    /// Page dimensions (width, height) in points, if available.
    pub page_dimensions: Option<(f32, f32)>,
}

impl ValidationResult {
    /// Create a validation result from a loaded PDF document.
    fn from_document(path: PathBuf, doc: &Document) -> Result<Self> {
        let pages = doc.get_pages();
        let page_count = pages.len();

        let version = doc.version.split_once(".").map(|(major, minor)| {
            (
                major.parse::<u8>().unwrap_or_default(),
                minor.parse::<u8>().unwrap_or_default(),
            )
        });

        let object_count = doc.objects.len();

        // Try to get page dimensions from first page
        let page_dimensions = pages.iter().next().and_then(|(_, page_id)| {
            doc.get_object(*page_id).ok().and_then(|page_obj| {
                if let lopdf::Object::Dictionary(page_dict) = page_obj {
                    page_dict.get(b"MediaBox").ok().and_then(|media_box| {
                        if let lopdf::Object::Array(arr) = media_box
                            && arr.len() >= 4
                        {
                            let width = arr[2].as_float().ok()?;
                            let height = arr[3].as_float().ok()?;
                            return Some((width, height));
                        }
                        None
                    })
                } else {
                    None
                }
            })
        });

        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            path,
            page_count,
            version,
            file_size,
            object_count,
            page_dimensions,
        })
    }
}

/// Summary of validation results for multiple files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Individual validation results for each file.
    pub results: Vec<ValidationResult>,

    /// Total number of pages across all files.
    pub total_pages: usize,

    /// Total file size in bytes.
    pub total_size: u64,

    /// Number of files that passed validation.
    pub files_validated: usize,

    /// Number of files that failed validation.
    pub files_failed: usize,
}

impl ValidationSummary {
    /// Create a summary from validation results.
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let total_pages = results.iter().map(|r| r.page_count).sum();
        let total_size = results.iter().map(|r| r.file_size).sum();
        let files_validated = results.len();

        Self {
            results,
            total_pages,
            total_size,
            files_validated,
            files_failed: 0,
        }
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for PDF files and configuration.
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate a single PDF file.
    ///
    /// Performs comprehensive validation including:
    /// - File existence and accessibility
    /// - PDF format validation
    /// - Encryption detection
    /// - Page count extraction
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist
    /// - File is not accessible
    /// - File is not a valid PDF
    /// - File is encrypted
    /// - PDF has no pages
    pub async fn validate_file(&self, path: &Path) -> Result<ValidationResult> {
        if !path.exists() {
            return Err(PdfBindError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(PdfBindError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let metadata =
            tokio::fs::metadata(path)
                .await
                .map_err(|e| PdfBindError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        if metadata.len() == 0 {
            return Err(PdfBindError::corrupted_pdf(
                path.to_path_buf(),
                "File is empty",
            ));
        }

        let doc = Document::load(path).map_err(|e| {
            // Check if it's an encryption error
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                PdfBindError::encrypted_pdf(path.to_path_buf())
            } else {
                PdfBindError::failed_to_load_pdf(path.to_path_buf(), err_msg)
            }
        })?;

        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(PdfBindError::corrupted_pdf(
                path.to_path_buf(),
                "PDF has no pages",
            ));
        }

        ValidationResult::from_document(path.to_path_buf(), &doc)
    }

    /// Validate multiple PDF files.
    ///
    /// Validates all input files and returns a summary of results.
    /// Can continue on errors if specified in the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any file fails validation and
    /// `continue_on_error` is false, or if no file passes.
    pub async fn validate_files(
        &self,
        paths: &[PathBuf],
        continue_on_error: bool,
    ) -> Result<ValidationSummary> {
        let mut results = Vec::new();
        let mut failed_count = 0;

        for path in paths {
            match self.validate_file(path).await {
                Ok(result) => {
                    results.push(result);
                }
                Err(e) => {
                    if continue_on_error {
                        eprintln!("Warning: Skipping {}: {}", path.display(), e);
                        failed_count += 1;
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        if results.is_empty() {
            return Err(PdfBindError::NoInputs);
        }

        let mut summary = ValidationSummary::from_results(results);
        summary.files_failed = failed_count;

        Ok(summary)
    }

    /// Validate a signature size.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is not a positive multiple of 4, or
    /// exceeds the largest practical size.
    pub fn validate_signature_size(&self, size: usize) -> Result<()> {
        if size < 4 || size % 4 != 0 {
            return Err(PdfBindError::invalid_signature_size(size));
        }

        if size > MAX_SIGNATURE_SIZE {
            return Err(PdfBindError::invalid_config(format!(
                "Signature size too large: {size} (maximum {MAX_SIGNATURE_SIZE}). \
                 Large signatures are hard to fold and bind poorly"
            )));
        }

        Ok(())
    }

    /// Validate one output path against the overwrite policy.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output file exists and no-clobber is set
    /// - Output directory doesn't exist
    /// - Output directory is not writable
    pub async fn validate_output(&self, config: &Config, output: &Path) -> Result<()> {
        if output.exists() {
            match config.overwrite_mode {
                OverwriteMode::NoClobber => {
                    return Err(PdfBindError::output_exists(output.to_path_buf()));
                }
                OverwriteMode::Prompt => {
                    // Prompt will be handled by the caller
                }
                OverwriteMode::Force => {
                    // Force overwrite, no check needed
                }
            }
        }

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            if !parent.exists() {
                return Err(PdfBindError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }

            let metadata = tokio::fs::metadata(parent).await.map_err(|e| {
                PdfBindError::FileNotAccessible {
                    path: parent.to_path_buf(),
                    source: e,
                }
            })?;

            if metadata.permissions().readonly() {
                return Err(PdfBindError::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Validate the complete configuration.
    ///
    /// Performs end-to-end validation of signature size, all inputs, and
    /// each derived output path.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation check fails.
    pub async fn validate_config(&self, config: &Config) -> Result<ValidationSummary> {
        self.validate_signature_size(config.signature_size)?;

        let summary = self
            .validate_files(&config.inputs, config.continue_on_error)
            .await?;

        for result in &summary.results {
            let output = config.output_path_for(&result.path);
            self.validate_output(config, &output).await?;
        }

        Ok(summary)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
