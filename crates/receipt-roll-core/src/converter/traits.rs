use std::path::Path;

use crate::config::ReceiptOptions;
use crate::error::Result;

/// Information about a converter backend
#[derive(Debug, Clone)]
pub struct ConverterInfo {
    /// Human-readable name
    pub name: &'static str,
    /// Version reported by the backend, if it reports one
    pub version: Option<String>,
}

/// Turns an HTML file into a (possibly multi-page) PDF sized for the roll.
pub trait HtmlConverter {
    /// Get information about this converter
    fn info(&self) -> ConverterInfo;

    /// Convert `html` into a PDF at `output`, honoring the page size in `options`.
    ///
    /// `output` may already exist (as an empty placeholder) and is overwritten.
    fn convert(&self, html: &Path, output: &Path, options: &ReceiptOptions) -> Result<()>;
}
