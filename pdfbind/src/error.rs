//! Error types for pdfbind.
//!
//! This module defines all error types that can occur while planning and
//! producing a section-bound PDF. Errors are designed to be informative and
//! actionable, providing clear context about what went wrong and how to fix
//! it.
//!
//! # Error Categories
//!
//! - **Input Errors**: no pages, invalid signature size, bad configuration
//! - **I/O Errors**: file not found, permission denied, etc.
//! - **PDF Errors**: invalid PDF structure, corrupted files
//! - **Bind Errors**: problems while materializing the reordered document

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for pdfbind operations.
pub type Result<T> = std::result::Result<T, PdfBindError>;

/// Main error type for pdfbind operations.
///
/// All errors in pdfbind use this type, which provides detailed context
/// about what went wrong and where.
#[derive(Debug)]
pub enum PdfBindError {
    /// The source document has no pages to process.
    NoPages,

    /// No input files were provided.
    NoInputs,

    /// Signature size is not a positive multiple of 4.
    InvalidSignatureSize {
        /// The signature size that was requested.
        size: usize,
        /// Nearest valid size at or below the requested one (at least 4).
        nearest_lower: usize,
        /// Nearest valid size above the requested one.
        nearest_upper: usize,
    },

    /// A source page could not be retrieved during materialization.
    PageReadFailed {
        /// Zero-based index of the page that failed.
        index: usize,
        /// Details about the failure.
        reason: String,
    },

    /// Input file was not found.
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Path exists but is not a regular file.
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Failed to load PDF file.
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is corrupted or has invalid structure.
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF file is encrypted and cannot be processed.
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Output file already exists and overwrite is not allowed.
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Assembling the reordered document failed.
    BindFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    Cancelled,

    /// Generic I/O error.
    Io {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Generic error with a custom message.
    Other {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for PdfBindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPages => {
                write!(f, "No pages to process")
            }
            Self::NoInputs => {
                write!(f, "No input files specified")
            }
            Self::InvalidSignatureSize {
                size,
                nearest_lower,
                nearest_upper,
            } => {
                write!(
                    f,
                    "Invalid signature size: {size}\n  \
                     Each sheet of paper holds 4 pages, so the signature size must be \
                     a positive multiple of 4. Try {nearest_lower} or {nearest_upper}"
                )
            }
            Self::PageReadFailed { index, reason } => {
                write!(
                    f,
                    "Failed to read source page at index {index}\n  Reason: {reason}"
                )
            }
            Self::FileNotFound { path } => {
                write!(f, "File not found: {}", path.display())
            }
            Self::FileNotAccessible { path, source } => {
                write!(
                    f,
                    "Cannot access file: {}\n  Reason: {}",
                    path.display(),
                    source
                )
            }
            Self::NotAFile { path } => {
                write!(f, "Not a file: {}", path.display())
            }
            Self::FailedToLoadPdf { path, reason } => {
                write!(
                    f,
                    "Failed to load PDF: {}\n  Reason: {}",
                    path.display(),
                    reason
                )
            }
            Self::CorruptedPdf { path, details } => {
                write!(
                    f,
                    "Corrupted or invalid PDF: {}\n  Details: {}",
                    path.display(),
                    details
                )
            }
            Self::EncryptedPdf { path } => {
                write!(
                    f,
                    "PDF is encrypted and cannot be processed: {}\n  \
                     Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
                    path.display()
                )
            }
            Self::OutputExists { path } => {
                write!(
                    f,
                    "Output file already exists: {}\n  \
                     Use --force to overwrite or choose a different output path",
                    path.display()
                )
            }
            Self::FailedToCreateOutput { path, source } => {
                write!(
                    f,
                    "Failed to create output file: {}\n  Reason: {}",
                    path.display(),
                    source
                )
            }
            Self::FailedToWrite { path, source } => {
                write!(
                    f,
                    "Failed to write to output file: {}\n  Reason: {}",
                    path.display(),
                    source
                )
            }
            Self::BindFailed { reason } => {
                write!(f, "Bind operation failed: {reason}")
            }
            Self::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {message}")
            }
            Self::Cancelled => {
                write!(f, "Operation cancelled by user")
            }
            Self::Io { source } => {
                write!(f, "I/O error: {source}")
            }
            Self::Other { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl std::error::Error for PdfBindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileNotAccessible { source, .. } => Some(source),
            Self::FailedToCreateOutput { source, .. } => Some(source),
            Self::FailedToWrite { source, .. } => Some(source),
            Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for PdfBindError {
    fn from(err: io::Error) -> Self {
        Self::Io { source: err }
    }
}

impl From<lopdf::Error> for PdfBindError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfBindError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfBindError {
    /// Create an InvalidSignatureSize error for the given size.
    ///
    /// Computes the two nearest valid signature sizes (multiples of 4, both
    /// at least 4) so the presentation layer can suggest alternatives.
    pub fn invalid_signature_size(size: usize) -> Self {
        let nearest_lower = (size / 4 * 4).max(4);
        let mut nearest_upper = (size / 4 + 1) * 4;
        if nearest_upper <= nearest_lower {
            nearest_upper = nearest_lower + 4;
        }

        Self::InvalidSignatureSize {
            size,
            nearest_lower,
            nearest_upper,
        }
    }

    /// Create a PageReadFailed error.
    pub fn page_read_failed(index: usize, reason: impl Into<String>) -> Self {
        Self::PageReadFailed {
            index,
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a BindFailed error.
    pub fn bind_failed(reason: impl Into<String>) -> Self {
        Self::BindFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (batch processing can continue).
    ///
    /// Returns true for per-file errors that might be acceptable in
    /// continue-on-error mode.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::PageReadFailed { .. }
                | Self::NoPages
        )
    }

    /// Check if this error should stop all processing immediately.
    ///
    /// Returns true for fatal errors that should always terminate.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NoInputs
                | Self::InvalidSignatureSize { .. }
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
                | Self::Cancelled
        )
    }

    /// Get the exit code for this error.
    ///
    /// Returns the appropriate process exit code based on error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoPages => 1,
            Self::NoInputs => 1,
            Self::InvalidSignatureSize { .. } => 1,
            Self::PageReadFailed { .. } => 6,
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::BindFailed { .. } => 6,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
