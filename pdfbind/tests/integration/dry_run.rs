//! Integration tests for dry-run behavior.
//!
//! A dry run validates inputs and projects the signature layout without
//! creating any file; these tests exercise that path at the library level.

use pdfbind::bind::plan_signatures;
use pdfbind::config::{Config, OverwriteMode};
use pdfbind::validation::Validator;
use tempfile::TempDir;

use crate::common::create_pdf;

#[tokio::test]
async fn test_dry_run_does_not_create_output() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "book.pdf", 10);

    let config = Config {
        inputs: vec![input.clone()],
        dry_run: true,
        quiet: true,
        overwrite_mode: OverwriteMode::Force,
        ..Default::default()
    };

    let validator = Validator::new();
    let summary = validator.validate_config(&config).await.unwrap();
    assert_eq!(summary.total_pages, 10);

    let output = config.output_path_for(&input);
    assert!(!output.exists(), "dry run must not create output");
}

#[tokio::test]
async fn test_dry_run_projects_signature_layout() {
    let dir = TempDir::new().unwrap();
    let input = create_pdf(dir.path(), "book.pdf", 21);

    let config = Config {
        inputs: vec![input],
        signature_size: 8,
        dry_run: true,
        quiet: true,
        ..Default::default()
    };

    let validator = Validator::new();
    let summary = validator.validate_config(&config).await.unwrap();

    // The projection is a pure plan over the validated page count.
    let result = &summary.results[0];
    let plan = plan_signatures(result.page_count, config.signature_size).unwrap();

    assert_eq!(plan.signature_count(), 3);
    assert_eq!(plan.total_sheets(), 6);
    assert_eq!(plan.blank_count(), 3);
}

#[tokio::test]
async fn test_dry_run_validates_all_inputs() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", 4);
    let b = create_pdf(dir.path(), "b.pdf", 7);

    let config = Config {
        inputs: vec![a, b],
        dry_run: true,
        quiet: true,
        ..Default::default()
    };

    let validator = Validator::new();
    let summary = validator.validate_config(&config).await.unwrap();

    assert_eq!(summary.files_validated, 2);
    assert_eq!(summary.total_pages, 11);
}
