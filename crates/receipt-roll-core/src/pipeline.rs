//! HTML to receipt roll, end to end.
//!
//! ```text
//! html ──convert──▶ pages.pdf ──combine──▶ combined.pdf ──trim──▶ output.pdf
//! ```
//!
//! Every intermediate file is a [`TempArtifact`] owned by the call and
//! removed whether the stages succeed or not.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ReceiptOptions;
use crate::converter::HtmlConverter;
use crate::error::Result;
use crate::geometry::ResultBox;
use crate::license::{LicenseCheck, LicenseStatus};
use crate::markup::{UNLICENSED_BANNER, ensure_body, insert_after_body};
use crate::pdf::{combine, trim};
use crate::util::TempArtifact;

/// Renders HTML receipts into single-page roll PDFs.
pub struct ReceiptPipeline {
    converter: Box<dyn HtmlConverter>,
    license: Box<dyn LicenseCheck>,
    options: ReceiptOptions,
    temp_dir: PathBuf,
}

impl ReceiptPipeline {
    /// Create a pipeline; fails if `options` are outside the supported range.
    pub fn new(
        converter: Box<dyn HtmlConverter>,
        license: Box<dyn LicenseCheck>,
        options: ReceiptOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            converter,
            license,
            options,
            temp_dir: std::env::temp_dir(),
        })
    }

    /// Keep intermediate files in `dir` instead of the system temp directory.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub const fn options(&self) -> &ReceiptOptions {
        &self.options
    }

    /// Convert `html` into a paged PDF at `output`, without combining or
    /// trimming.
    ///
    /// The markup must contain a `<body>` tag. Unlicensed output carries a
    /// banner right after it.
    pub fn html_to_pdf(&self, html: &str, output: impl AsRef<Path>) -> Result<()> {
        ensure_body(html)?;

        let html = match self.license.status() {
            LicenseStatus::Licensed => html.to_string(),
            LicenseStatus::Unlicensed => insert_after_body(html, UNLICENSED_BANNER)?,
        };

        let source = TempArtifact::create_in(&self.temp_dir, "html", ".html")?;
        let result = write_markup(&html, source.path()).and_then(|()| {
            self.converter
                .convert(source.path(), output.as_ref(), &self.options)
        });
        source.discard();

        if result.is_ok() {
            info!("Converted HTML with {}", self.converter.info().name);
        }
        result
    }

    /// Convert `html` and write the trimmed receipt to `output`.
    pub fn html_to_receipt(&self, html: &str, output: impl AsRef<Path>) -> Result<ResultBox> {
        let pages = TempArtifact::create_in(&self.temp_dir, "converted", ".pdf")?;
        let result = self.html_to_pdf(html, pages.path()).and_then(|()| {
            combine_and_trim_in(
                &self.temp_dir,
                pages.path(),
                output.as_ref(),
                self.options.bottom_margin,
            )
        });

        pages.discard();
        result
    }
}

fn write_markup(html: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(html.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Combine the pages of `input` and trim the result into `output`.
///
/// The combined document only ever exists as a temporary file.
pub fn combine_and_trim(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    bottom_margin: u32,
) -> Result<ResultBox> {
    combine_and_trim_in(std::env::temp_dir(), input, output, bottom_margin)
}

/// [`combine_and_trim`], keeping the intermediate file in `temp_dir`.
pub fn combine_and_trim_in(
    temp_dir: impl AsRef<Path>,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    bottom_margin: u32,
) -> Result<ResultBox> {
    let combined = TempArtifact::create_in(temp_dir, "combined", ".pdf")?;

    let result = combine(input.as_ref(), combined.path())
        .and_then(|_| trim(combined.path(), output.as_ref(), bottom_margin));

    combined.discard();

    if let Ok(size) = &result {
        info!("Receipt written to {} ({})", output.as_ref().display(), size);
    }
    result
}
