//! pdfbind - Reorder PDF pages into printable signatures for section binding.
//!
//! This library reorders the pages of a PDF so that, once the output is
//! printed double-sided and the sheets are folded and nested into
//! signatures, the pages read in correct sequential order. It supports:
//!
//! - Pure, deterministic signature imposition planning
//! - Blank-page padding for incomplete signatures
//! - Lazy page materialization with optional progress reporting
//! - Atomic output writes
//! - Comprehensive input validation and error handling
//!
//! # Examples
//!
//! ## Binding a document
//!
//! ```no_run
//! use pdfbind::bind::bind_pdfs;
//! use pdfbind::config::Config;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     inputs: vec![PathBuf::from("book.pdf")],
//!     signature_size: 16,
//!     ..Default::default()
//! };
//!
//! let results = bind_pdfs(&config).await?;
//! println!(
//!     "Reordered into {} signatures",
//!     results[0].statistics.signature_count
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the planner directly
//!
//! ```
//! use pdfbind::bind::plan_signatures;
//!
//! let plan = plan_signatures(100, 16).unwrap();
//! assert_eq!(plan.signature_count(), 7);
//! assert_eq!(plan.blank_count(), 12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bind;
pub mod config;
pub mod error;
pub mod io;
pub mod output;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use bind::{ImpositionPlan, PageSlot, plan_signatures};
pub use config::Config;
pub use error::{PdfBindError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
