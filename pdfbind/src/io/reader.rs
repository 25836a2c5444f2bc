//! PDF reading and loading operations.
//!
//! Loading parses the whole document with `lopdf`, which is CPU-bound, so
//! the work runs on the blocking thread pool to keep the async runtime
//! responsive.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfBindError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Whether to verify the document has pages after loading.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that skips verification (faster but less safe).
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Load a single PDF document.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the PDF file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File cannot be read
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfbind::io::reader::PdfReader;
    /// # use std::path::Path;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let reader = PdfReader::new();
    /// let loaded = reader.load(Path::new("book.pdf")).await?;
    /// println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();

        let start = Instant::now();

        // Parse in a blocking task to avoid stalling the async runtime.
        let load_path = path_buf.clone();
        let doc = task::spawn_blocking(move || Document::load(&load_path))
            .await
            .map_err(|e| PdfBindError::other(format!("Load task failed: {e}")))?
            .map_err(|e| {
                let err_msg = e.to_string();
                if err_msg.contains("encrypt") || err_msg.contains("password") {
                    PdfBindError::encrypted_pdf(path_buf.clone())
                } else {
                    PdfBindError::failed_to_load_pdf(path_buf.clone(), err_msg)
                }
            })?;

        if self.verify && doc.get_pages().is_empty() {
            return Err(PdfBindError::corrupted_pdf(
                path_buf.clone(),
                "PDF has no pages",
            ));
        }

        let load_time = start.elapsed();
        let page_count = doc.get_pages().len();
        let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

        Ok(LoadedPdf {
            document: doc,
            path: path_buf,
            page_count,
            load_time,
            file_size,
        })
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Object, dictionary};
    use tempfile::TempDir;

    fn create_test_pdf(dir: &TempDir, name: &str, pages: usize) -> PathBuf {
        let mut doc = Document::with_version("1.4");

        let pages_id = doc.new_object_id();
        let mut page_ids = Vec::new();
        for _ in 0..pages {
            let page_id = doc.new_object_id();
            let page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            };
            doc.objects.insert(page_id, page.into());
            page_ids.push(page_id);
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.into_iter().map(Object::from).collect::<Vec<Object>>(),
            "Count" => pages as i64,
        };
        doc.objects.insert(pages_id, pages_dict.into());

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let path = dir.path().join(name);
        doc.save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_single_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let pdf_path = create_test_pdf(&temp_dir, "test.pdf", 3);

        let reader = PdfReader::new();
        let result = reader.load(&pdf_path).await;

        assert!(result.is_ok());
        let loaded = result.unwrap();
        assert_eq!(loaded.page_count, 3);
        assert_eq!(loaded.path, pdf_path);
        assert!(loaded.file_size > 0);
    }

    #[tokio::test]
    async fn test_load_nonexistent_pdf() {
        let reader = PdfReader::new();
        let result = reader.load(Path::new("/nonexistent.pdf")).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_invalid_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invalid.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let reader = PdfReader::new();
        let result = reader.load(&path).await;

        assert!(matches!(
            result,
            Err(PdfBindError::FailedToLoadPdf { .. })
        ));
    }

    #[tokio::test]
    async fn test_reader_without_verification() {
        let temp_dir = TempDir::new().unwrap();
        let pdf_path = create_test_pdf(&temp_dir, "test.pdf", 1);

        let reader = PdfReader::without_verification();
        let result = reader.load(&pdf_path).await;

        assert!(result.is_ok());
    }
}
