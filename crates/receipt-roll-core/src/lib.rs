//! Receipt Roll Core Library
//!
//! This library turns converter output into PDFs for POS thermal printers:
//! - Stacking a multi-page document onto one continuous page
//! - Trimming trailing blank space measured on a rasterized probe
//! - Driving an external HTML-to-PDF converter end to end

pub mod config;
pub mod converter;
pub mod error;
pub mod geometry;
pub mod license;
pub mod markup;
pub mod pdf;
pub mod pipeline;
pub mod scan;
pub mod util;

pub use config::{AppConfig, ReceiptFont, ReceiptOptions};
pub use converter::{ConverterInfo, HtmlConverter, Htmldoc, create_converter};
pub use error::{Error, Result};
pub use geometry::{PageGeometry, ResultBox};
pub use license::{LicenseCheck, LicenseStatus};
pub use pdf::{BlankProbe, RasterFrame, SourceDocument, combine, probe, rasterize_page, trim};
pub use pipeline::{ReceiptPipeline, combine_and_trim, combine_and_trim_in};
pub use scan::{first_non_blank_row_from_bottom, trailing_blank_rows};
