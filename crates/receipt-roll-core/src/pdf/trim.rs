//! Cutting trailing blank space off the bottom of a page.
//!
//! The page is rasterized only to *measure* where the ink ends. The output
//! still carries the original vector content: page 0 is drawn at its full
//! height, anchored to the top of a shorter page, and the MediaBox clips the
//! blank tail away.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geometry::{PageGeometry, ResultBox};
use crate::scan::trailing_blank_rows;
use super::compose::{Placement, build_single_page, lift_pages, write_pdf};
use super::document::SourceDocument;
use super::raster::{RasterFrame, rasterize_page};

/// What the rasterizer saw on page 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankProbe {
    /// Rows in the rendered frame, as reported by the rasterizer
    pub pixel_height: u32,
    /// Consecutive all-zero rows at the bottom of the frame
    pub blank_rows: u32,
}

impl BlankProbe {
    /// Measure a rendered frame.
    pub fn measure(frame: &RasterFrame) -> Result<Self> {
        let stride = frame.row_stride();
        if stride == 0 {
            return Err(Error::Rasterization {
                page: 0,
                reason: "Rasterizer produced a zero-width frame".to_string(),
            });
        }

        let blank_rows = u32::try_from(trailing_blank_rows(&frame.pixels, stride))
            .unwrap_or(u32::MAX)
            .min(frame.height);

        Ok(Self {
            pixel_height: frame.height,
            blank_rows,
        })
    }

    /// Rows from the top down to and including the lowest inked row.
    pub const fn content_height(self) -> u32 {
        self.pixel_height.saturating_sub(self.blank_rows)
    }
}

/// Rasterize page 0 of `input` and count its trailing blank rows.
pub fn probe(input: impl AsRef<Path>) -> Result<(RasterFrame, BlankProbe)> {
    let source = SourceDocument::open(input)?;
    let frame = rasterize_page(&source, 0)?;
    let probe = BlankProbe::measure(&frame)?;
    Ok((frame, probe))
}

/// Trim trailing blank rows from page 0 of `input` and write the result to
/// `output`, leaving `bottom_margin` extra units below the content.
///
/// The margin is added as-is to a point height. That is exact because the
/// rasterizer renders one pixel per point.
///
/// Nothing is written to `output` unless rasterizing and scanning succeed.
pub fn trim(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    bottom_margin: u32,
) -> Result<ResultBox> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let source = SourceDocument::open(input)?;
    let page = source.first_page_geometry()?;

    // Only the count survives this block; the pixel buffer is freed here
    let probe = {
        let frame = rasterize_page(&source, 0)?;
        BlankProbe::measure(&frame)?
    };

    #[allow(clippy::cast_precision_loss)]
    let height = probe.content_height().saturating_add(bottom_margin) as f32;
    let trimmed = PageGeometry::new(page.width, height);

    debug!(
        "Page 0 of {} is {} ({} px tall), {} trailing blank rows, margin {}",
        input.display(),
        page,
        probe.pixel_height,
        probe.blank_rows,
        bottom_margin
    );

    let (mut doc, forms) = lift_pages(source, 1)?;
    let placements: Vec<Placement> = forms
        .into_iter()
        .map(|form| Placement {
            form,
            x: 0.0,
            // Top-aligned; everything below y = 0 falls off the page
            y: trimmed.height - page.height,
            width: page.width,
            height: page.height,
        })
        .collect();

    build_single_page(&mut doc, trimmed, &placements)?;
    write_pdf(&mut doc, output)?;

    info!("Trimmed {} to {}", output.display(), trimmed);
    Ok(ResultBox::new(trimmed.width, trimmed.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, inked_rows: &[u32], height: u32) -> RasterFrame {
        let stride = width as usize * 4;
        let mut pixels = vec![0; stride * height as usize];
        for &row in inked_rows {
            pixels[row as usize * stride + 3] = 0xff;
        }
        RasterFrame {
            width,
            height,
            pixels,
        }
    }

    #[test]
    fn test_measure_counts_tail() {
        let probe = BlankProbe::measure(&frame(4, &[0, 139], 150)).unwrap_or(BlankProbe {
            pixel_height: 0,
            blank_rows: 0,
        });
        assert_eq!(probe.pixel_height, 150);
        assert_eq!(probe.blank_rows, 10);
        assert_eq!(probe.content_height(), 140);
    }

    #[test]
    fn test_measure_fully_blank() {
        let probe = BlankProbe::measure(&frame(5, &[], 30)).unwrap_or(BlankProbe {
            pixel_height: 0,
            blank_rows: 0,
        });
        assert_eq!(probe.blank_rows, 30);
        assert_eq!(probe.content_height(), 0);
    }

    #[test]
    fn test_measure_rejects_zero_width() {
        let result = BlankProbe::measure(&frame(0, &[], 10));
        assert!(matches!(result, Err(Error::Rasterization { .. })));
    }
}
