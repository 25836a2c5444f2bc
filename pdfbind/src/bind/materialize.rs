//! Page materialization.
//!
//! This module turns an [`ImpositionPlan`](crate::bind::plan::ImpositionPlan)
//! into actual page content by consulting a [`PageSource`]. Content passes
//! through untouched: a planned source slot emits exactly what the source
//! returns, a blank slot emits the source's blank value.
//!
//! Materialization is lazy. [`Materializer::stream`] yields pages one at a
//! time in plan order, so a caller can stop consuming early without paying
//! for the rest of the document.

use crate::bind::plan::{ImpositionPlan, PageSlot};
use crate::error::Result;

/// Capability for retrieving page content by index.
///
/// The planner bounds-checks indices by construction, so `get_page` is
/// expected to succeed for every index below `page_count`. If it still
/// fails (e.g. a corrupted page object), the error propagates and
/// materialization halts rather than silently substituting a blank.
pub trait PageSource {
    /// The page content type this source produces.
    type Page;

    /// Number of pages this source can provide.
    fn page_count(&self) -> usize;

    /// Retrieve the page at the given zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::PageReadFailed`](crate::error::PdfBindError)
    /// carrying the failing index if the page cannot be read.
    fn get_page(&self, index: usize) -> Result<Self::Page>;

    /// Produce the content used for blank padding pages.
    fn blank_page(&self) -> Self::Page;
}

/// Materializes planned slots into page content.
pub struct Materializer;

impl Materializer {
    /// Create a new materializer.
    pub fn new() -> Self {
        Self
    }

    /// Lazily yield page content in plan order.
    ///
    /// Each item is the content for one output position. Reads happen as
    /// the iterator is advanced, so dropping it early skips the remaining
    /// source reads.
    pub fn stream<'a, S>(
        &self,
        plan: &'a ImpositionPlan,
        source: &'a S,
    ) -> impl Iterator<Item = Result<S::Page>> + 'a
    where
        S: PageSource,
    {
        plan.slots().iter().map(move |slot| match slot {
            PageSlot::Source(index) => source.get_page(*index),
            PageSlot::Blank => Ok(source.blank_page()),
        })
    }

    /// Materialize the full plan into a vector of page content.
    ///
    /// # Errors
    ///
    /// Stops at the first failing source read and returns its error;
    /// nothing after the failure point is produced.
    pub fn materialize<S>(&self, plan: &ImpositionPlan, source: &S) -> Result<Vec<S::Page>>
    where
        S: PageSource,
    {
        self.stream(plan, source).collect()
    }

    /// Materialize the full plan, reporting progress after each position.
    ///
    /// The observer receives `(processed, total)` after every emitted page.
    /// It is notification-only: it cannot alter the materialized output.
    /// Callers that don't need progress use [`Materializer::materialize`],
    /// which carries no observer at all.
    ///
    /// # Errors
    ///
    /// Stops at the first failing source read and returns its error.
    pub fn materialize_with_progress<S, F>(
        &self,
        plan: &ImpositionPlan,
        source: &S,
        mut on_progress: F,
    ) -> Result<Vec<S::Page>>
    where
        S: PageSource,
        F: FnMut(usize, usize),
    {
        let total = plan.len();
        let mut pages = Vec::with_capacity(total);

        for (processed, page) in self.stream(plan, source).enumerate() {
            pages.push(page?);
            on_progress(processed + 1, total);
        }

        Ok(pages)
    }
}

impl Default for Materializer {
    fn default() -> Self {
        Self::new()
    }
}
