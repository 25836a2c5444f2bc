//! Section-binding operations.
//!
//! This module provides the core of pdfbind:
//! - Signature imposition planning (pure page-order computation)
//! - Materialization of planned positions into page content
//! - Document assembly with blank padding
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::bind::bind_pdfs;
//! use pdfbind::config::Config;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     inputs: vec![PathBuf::from("book.pdf")],
//!     ..Default::default()
//! };
//!
//! let results = bind_pdfs(&config).await?;
//! for result in &results {
//!     println!(
//!         "{}: {} pages over {} signatures",
//!         result.input.display(),
//!         result.statistics.output_pages,
//!         result.statistics.signature_count
//!     );
//! }
//! # Ok(())
//! # }
//! ```

pub mod binder;
pub mod materialize;
pub mod plan;

pub use binder::{BindResult, BindStatistics, Binder, DocumentPages, OutputPage};
pub use materialize::{Materializer, PageSource};
pub use plan::{ImpositionPlan, PageSlot, plan_signatures};

use crate::config::Config;
use crate::error::Result;

/// Bind every configured input into section-ready page order.
///
/// Convenience function that creates a binder and processes all inputs.
///
/// # Errors
///
/// Returns an error if any bind step fails (or all of them, when
/// continuing on errors).
pub async fn bind_pdfs(config: &Config) -> Result<Vec<BindResult>> {
    let binder = Binder::new();
    binder.bind_all(config).await
}
