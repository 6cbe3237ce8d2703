use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::PageGeometry;

/// Unified error type for receipt-roll-core
///
/// This enum encompasses all error cases that can occur in the library:
/// - PDF operations (opening, rasterizing, writing)
/// - HTML conversion through the external converter
/// - Configuration loading and validation
/// - Temporary file cleanup and general I/O
#[derive(Error, Debug)]
pub enum Error {
    // ==========================================================================
    // PDF Errors
    // ==========================================================================
    /// Source document is missing, unreadable, or not a valid PDF
    #[error("failed to open PDF: {0}")]
    DocumentOpen(String),

    /// Invalid page number requested
    #[error("invalid page number {page} (document has {total} pages)")]
    InvalidPage { page: usize, total: usize },

    /// A page does not share the geometry of page 0
    #[error("page {page} is {found} but page 0 is {expected}; mixed page sizes cannot be stacked")]
    NonUniformPages {
        page: usize,
        expected: PageGeometry,
        found: PageGeometry,
    },

    /// The rasterizer could not produce a pixel buffer
    #[error("failed to rasterize page {page}: {reason}")]
    Rasterization { page: usize, reason: String },

    /// Failed to write an output PDF
    #[error("failed to write PDF: {0}")]
    PdfWrite(String),

    /// Error from the lopdf library
    #[error("lopdf error: {0}")]
    Lopdf(String),

    // ==========================================================================
    // Conversion Errors
    // ==========================================================================
    /// The external HTML converter could not be located
    #[error("HTML converter not found: {0}")]
    DependencyNotFound(String),

    /// The external HTML converter has an unsupported version
    #[error("unsupported HTML converter version: {0}")]
    UnsupportedDependencyVersion(String),

    /// The external HTML converter ran but did not produce a document
    #[error("HTML conversion failed: {0}")]
    Conversion(String),

    /// Markup rejected before conversion
    #[error("invalid HTML markup: {0}")]
    InvalidMarkup(String),

    /// Receipt options outside the supported range
    #[error("invalid receipt option '{field}': {reason}")]
    InvalidOptions { field: &'static str, reason: String },

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Failed to load configuration file
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    // ==========================================================================
    // I/O Errors
    // ==========================================================================
    /// A temporary file could not be removed
    #[error("failed to remove temporary file {}: {source}", path.display())]
    ResourceCleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for Error {
    fn from(e: lopdf::Error) -> Self {
        Self::Lopdf(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
