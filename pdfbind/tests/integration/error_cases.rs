//! Integration tests for error handling and edge cases.

use pdfbind::bind::bind_pdfs;
use pdfbind::config::{Config, OverwriteMode};
use pdfbind::error::PdfBindError;
use pdfbind::validation::Validator;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::create_pdf;

fn quiet_config(inputs: Vec<PathBuf>) -> Config {
    Config {
        inputs,
        quiet: true,
        overwrite_mode: OverwriteMode::Force,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_error_nonexistent_input() {
    let validator = Validator::new();
    let result = validator
        .validate_file(&PathBuf::from("/nonexistent/file.pdf"))
        .await;

    assert!(result.is_err(), "Should fail with nonexistent file");
    assert!(matches!(
        result.unwrap_err(),
        PdfBindError::FileNotFound { .. }
    ));
}

#[tokio::test]
async fn test_error_bind_nonexistent_input() {
    let config = quiet_config(vec![PathBuf::from("/nonexistent/file.pdf")]);

    let result = bind_pdfs(&config).await;
    assert!(result.is_err(), "Should fail with nonexistent file");
}

#[test]
fn test_error_empty_input_list() {
    let config = quiet_config(vec![]);
    assert!(config.validate().is_err(), "Should fail with no inputs");
}

#[tokio::test]
async fn test_error_invalid_signature_size() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "book.pdf", 4);

    let mut config = quiet_config(vec![input]);
    config.signature_size = 15;

    let result = bind_pdfs(&config).await;
    match result.unwrap_err() {
        PdfBindError::InvalidSignatureSize {
            size,
            nearest_lower,
            nearest_upper,
        } => {
            assert_eq!(size, 15);
            assert_eq!(nearest_lower, 12);
            assert_eq!(nearest_upper, 16);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_corrupted_pdf() {
    let dir = TempDir::new().unwrap();
    let corrupted = dir.path().join("corrupted.pdf");
    std::fs::write(&corrupted, b"this is not a pdf").unwrap();

    let config = quiet_config(vec![corrupted]);

    let result = bind_pdfs(&config).await;
    assert!(matches!(
        result.unwrap_err(),
        PdfBindError::FailedToLoadPdf { .. }
    ));
}

#[tokio::test]
async fn test_error_output_exists_no_clobber() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "book.pdf", 4);

    // Pre-create the derived output path
    let existing = dir.path().join("book_section_bound.pdf");
    std::fs::File::create(&existing).unwrap();

    let mut config = quiet_config(vec![input]);
    config.overwrite_mode = OverwriteMode::NoClobber;

    let validator = Validator::new();
    let result = validator.validate_config(&config).await;

    assert!(matches!(
        result.unwrap_err(),
        PdfBindError::OutputExists { .. }
    ));
}

#[tokio::test]
async fn test_continue_on_error_skips_bad_files() {
    let dir = TempDir::new().unwrap();
    let good = create_pdf(dir.path(), "good.pdf", 4);
    let corrupted = dir.path().join("corrupted.pdf");
    std::fs::write(&corrupted, b"garbage").unwrap();

    let mut config = quiet_config(vec![corrupted, good.clone()]);
    config.continue_on_error = true;

    let results = bind_pdfs(&config).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].input, good);
}

#[tokio::test]
async fn test_all_inputs_failing_is_an_error() {
    let dir = TempDir::new().unwrap();
    let corrupted = dir.path().join("corrupted.pdf");
    std::fs::write(&corrupted, b"garbage").unwrap();

    let mut config = quiet_config(vec![corrupted]);
    config.continue_on_error = true;

    let result = bind_pdfs(&config).await;
    assert!(result.is_err(), "all inputs failing must not succeed");
}

#[tokio::test]
async fn test_single_page_document() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "single.pdf", 1);

    let results = bind_pdfs(&quiet_config(vec![input])).await.unwrap();
    let stats = &results[0].statistics;

    // One page still fills a whole 8-page signature.
    assert_eq!(stats.output_pages, 8);
    assert_eq!(stats.blank_pages, 7);
    assert_eq!(stats.signature_count, 1);
}
