//! Document binding orchestration.
//!
//! This module ties the pieces together: load a source PDF, plan its
//! signature order, materialize the planned positions into page references,
//! and assemble the reordered output document. Blank padding pages are
//! allocated fresh, sized like the first source page.

use futures::stream::{self, StreamExt};
use lopdf::{Document, Object, ObjectId, dictionary};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::bind::materialize::{Materializer, PageSource};
use crate::bind::plan::{ImpositionPlan, plan_signatures};
use crate::config::Config;
use crate::error::{PdfBindError, Result};
use crate::io::PdfReader;
use crate::utils::format_file_size;

/// Reference to one physical output page.
///
/// Either an existing page object of the source document or a blank page to
/// be allocated in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPage {
    /// An existing page object of the source document.
    Source(ObjectId),
    /// A blank padding page.
    Blank,
}

/// Page source backed by a loaded PDF document.
///
/// Pages are addressed by zero-based index in document order; the content
/// handed out is the page's object ID, verified to resolve in the document.
pub struct DocumentPages<'a> {
    document: &'a Document,
    page_ids: Vec<ObjectId>,
}

impl<'a> DocumentPages<'a> {
    /// Create a page source over the given document.
    pub fn new(document: &'a Document) -> Self {
        let page_ids = document.get_pages().into_values().collect();
        Self { document, page_ids }
    }
}

impl PageSource for DocumentPages<'_> {
    type Page = OutputPage;

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn get_page(&self, index: usize) -> Result<OutputPage> {
        let id = self
            .page_ids
            .get(index)
            .copied()
            .ok_or_else(|| PdfBindError::page_read_failed(index, "page index out of bounds"))?;

        // The page tree can reference objects that don't exist in a
        // damaged file; surface that as a read failure for this index.
        self.document
            .get_object(id)
            .map_err(|e| PdfBindError::page_read_failed(index, e.to_string()))?;

        Ok(OutputPage::Source(id))
    }

    fn blank_page(&self) -> OutputPage {
        OutputPage::Blank
    }
}

/// Statistics about a binding operation.
#[derive(Debug, Clone)]
pub struct BindStatistics {
    /// Number of pages in the source document.
    pub total_pages: usize,

    /// Number of pages in the reordered output (source plus blanks).
    pub output_pages: usize,

    /// Number of blank padding pages added.
    pub blank_pages: usize,

    /// Pages per signature.
    pub signature_size: usize,

    /// Physical sheets of paper per signature.
    pub sheets_per_signature: usize,

    /// Number of signatures.
    pub signature_count: usize,

    /// Total sheets of paper needed to print the document.
    pub total_sheets: usize,

    /// Time taken to load the source PDF.
    pub load_time: Duration,

    /// Total time for the bind (load, plan, materialize, assemble).
    pub bind_time: Duration,

    /// Size of the input file in bytes.
    pub input_size: u64,
}

impl BindStatistics {
    /// Derive the signature statistics from a plan.
    ///
    /// Timing and file size fields start at zero; the binder fills them in
    /// for real runs. Dry runs use this directly.
    pub fn from_plan(plan: &ImpositionPlan) -> Self {
        Self {
            total_pages: plan.total_pages(),
            output_pages: plan.len(),
            blank_pages: plan.blank_count(),
            signature_size: plan.signature_size(),
            sheets_per_signature: plan.sheets_per_signature(),
            signature_count: plan.signature_count(),
            total_sheets: plan.total_sheets(),
            load_time: Duration::ZERO,
            bind_time: Duration::ZERO,
            input_size: 0,
        }
    }

    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of binding one document.
#[derive(Debug)]
pub struct BindResult {
    /// Path of the source file.
    pub input: PathBuf,

    /// The reordered PDF document.
    pub document: Document,

    /// Statistics about the bind.
    pub statistics: BindStatistics,
}

/// Binds documents into section-ready page order.
pub struct Binder {
    /// Reader for loading source PDFs.
    reader: PdfReader,

    /// Materializer mapping planned slots to page references.
    materializer: Materializer,
}

impl Binder {
    /// Create a new binder with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            materializer: Materializer::new(),
        }
    }

    /// Bind a single document.
    ///
    /// Loads the PDF at `input`, computes its signature order for
    /// `config.signature_size`, and returns the reordered document without
    /// writing it anywhere.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded, the signature size is
    /// invalid, or the document's page tree cannot be rewritten.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfbind::bind::Binder;
    /// # use pdfbind::config::Config;
    /// # use std::path::Path;
    /// # async fn example(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    /// let binder = Binder::new();
    /// let result = binder.bind_file(Path::new("book.pdf"), &config).await?;
    /// println!(
    ///     "{} pages over {} signatures",
    ///     result.statistics.output_pages,
    ///     result.statistics.signature_count
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub async fn bind_file(&self, input: &Path, config: &Config) -> Result<BindResult> {
        self.bind_file_with_progress(input, config, |_, _| {}).await
    }

    /// Bind a single document, reporting materialization progress.
    ///
    /// The observer receives `(processed, total)` after each output
    /// position, where total counts blank padding pages too.
    pub async fn bind_file_with_progress<F>(
        &self,
        input: &Path,
        config: &Config,
        on_progress: F,
    ) -> Result<BindResult>
    where
        F: FnMut(usize, usize),
    {
        let bind_start = Instant::now();

        let loaded = self.reader.load(input).await?;
        let plan = plan_signatures(loaded.page_count, config.signature_size)?;
        let document = self.assemble(&loaded.document, &plan, on_progress)?;

        let statistics = BindStatistics {
            load_time: loaded.load_time,
            bind_time: bind_start.elapsed(),
            input_size: loaded.file_size,
            ..BindStatistics::from_plan(&plan)
        };

        Ok(BindResult {
            input: loaded.path,
            document,
            statistics,
        })
    }

    /// Bind every configured input.
    ///
    /// Inputs are processed concurrently, bounded by
    /// [`Config::effective_jobs`], and results are returned in input order
    /// regardless of completion order. With `continue_on_error`, files that
    /// fail recoverably are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns the first error when not continuing on errors, or an error
    /// if every input failed.
    pub async fn bind_all(&self, config: &Config) -> Result<Vec<BindResult>> {
        if config.inputs.is_empty() {
            return Err(PdfBindError::NoInputs);
        }

        let jobs = config.effective_jobs().max(1);

        let tasks = config.inputs.iter().enumerate().map(|(idx, input)| {
            let input = input.clone();
            async move {
                let result = self.bind_file(&input, config).await;
                (idx, result)
            }
        });

        let mut indexed: Vec<(usize, Result<BindResult>)> = stream::iter(tasks)
            .buffer_unordered(jobs)
            .collect::<Vec<_>>()
            .await;

        // Restore input order
        indexed.sort_by_key(|(idx, _)| *idx);

        let mut results = Vec::with_capacity(indexed.len());
        for (_, result) in indexed {
            match result {
                Ok(bound) => results.push(bound),
                Err(e) if config.continue_on_error && e.is_recoverable() => {
                    eprintln!("Warning: Skipping file due to error: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        if results.is_empty() {
            return Err(PdfBindError::other("All input files failed to process"));
        }

        Ok(results)
    }

    /// Assemble the reordered output document.
    ///
    /// Clones the source, materializes the plan into page references,
    /// allocates blank pages where needed, and rewrites the page tree's
    /// `Kids` array into plan order.
    fn assemble<F>(
        &self,
        source: &Document,
        plan: &ImpositionPlan,
        on_progress: F,
    ) -> Result<Document>
    where
        F: FnMut(usize, usize),
    {
        let source_pages = DocumentPages::new(source);
        let ordered = self
            .materializer
            .materialize_with_progress(plan, &source_pages, on_progress)?;

        let mut output = source.clone();

        let pages_id = output
            .catalog()
            .map_err(|e| PdfBindError::bind_failed(format!("Failed to get catalog: {e}")))?
            .get(b"Pages")
            .and_then(|p| p.as_reference())
            .map_err(|e| {
                PdfBindError::bind_failed(format!("Failed to get pages reference: {e}"))
            })?;

        let media_box = first_page_media_box(source);

        let mut kids = Vec::with_capacity(ordered.len());
        for page in ordered {
            let id = match page {
                OutputPage::Source(id) => id,
                OutputPage::Blank => create_blank_page(&mut output, pages_id, media_box.clone()),
            };
            kids.push(Object::Reference(id));
        }

        set_page_tree(&mut output, pages_id, kids)?;

        // Renumber for a consistent object layout
        output.renumber_objects();

        Ok(output)
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the page tree's Kids array and page count.
fn set_page_tree(doc: &mut Document, pages_id: ObjectId, kids: Vec<Object>) -> Result<()> {
    let count = kids.len() as i64;

    let pages_obj = doc
        .get_object_mut(pages_id)
        .map_err(|e| PdfBindError::bind_failed(format!("Failed to get pages object: {e}")))?;

    if let Object::Dictionary(dict) = pages_obj {
        dict.set("Kids", Object::Array(kids));
        dict.set("Count", Object::Integer(count));
        Ok(())
    } else {
        Err(PdfBindError::bind_failed(
            "Pages object is not a dictionary",
        ))
    }
}

/// Allocate a blank page in the document and return its ID.
fn create_blank_page(doc: &mut Document, parent: ObjectId, media_box: Object) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "MediaBox" => media_box,
        "Resources" => dictionary! {},
    })
}

/// MediaBox of the first source page, falling back to US Letter.
fn first_page_media_box(doc: &Document) -> Object {
    let us_letter = || Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]);

    let Some(page_id) = doc.get_pages().into_values().next() else {
        return us_letter();
    };

    match doc.get_object(page_id) {
        Ok(Object::Dictionary(dict)) => dict.get(b"MediaBox").cloned().unwrap_or_else(|_| us_letter()),
        _ => us_letter(),
    }
}
