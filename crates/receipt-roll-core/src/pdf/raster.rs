use image::{ImageEncoder, RgbaImage};
use mupdf::{Colorspace, Document as MuDocument, Matrix};

use crate::error::{Error, Result};
use super::document::SourceDocument;
use super::page_index::PageIndex;

/// Bytes per pixel in a [`RasterFrame`] (blue, green, red, alpha)
pub const BYTES_PER_PIXEL: usize = 4;

/// One pixel per point, so pixel rows line up with point heights
pub const RASTER_SCALE: f32 = 1.0;

/// A rendered page as a dense, row-major BGRA buffer.
///
/// Background pixels are transparent black, so any pixel the page did not
/// paint is four zero bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RasterFrame {
    /// Bytes per row
    pub const fn row_stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Re-encode as PNG, swapping back to RGBA. Used for inspecting probes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let rgba: Vec<u8> = self
            .pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .flat_map(|px| [px[2], px[1], px[0], px[3]])
            .collect();

        let img = RgbaImage::from_raw(self.width, self.height, rgba).ok_or_else(|| {
            Error::Rasterization {
                page: 0,
                reason: "Pixel buffer does not match frame size".to_string(),
            }
        })?;

        let mut png_data = Vec::new();
        image::codecs::png::PngEncoder::new(&mut png_data)
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| Error::Rasterization {
                page: 0,
                reason: format!("Failed to encode PNG: {e}"),
            })?;

        Ok(png_data)
    }
}

/// Rasterize one page of a source document.
///
/// The pixel size comes from the rasterizer, not from the page geometry:
/// rounding may make it differ from the point size by a pixel.
pub fn rasterize_page(source: &SourceDocument, page_num: usize) -> Result<RasterFrame> {
    let page_index = PageIndex::try_from_page_num(page_num, source.page_count())?;
    let render_err = |reason: String| Error::Rasterization { page: page_num, reason };

    // Scoped: the mupdf document and page are released when this returns
    let doc = MuDocument::from_bytes(source.bytes(), "")
        .map_err(|e| Error::DocumentOpen(format!("Rasterizer rejected document: {e}")))?;
    let page = doc
        .load_page(page_index.into())
        .map_err(|e| render_err(format!("Failed to load page: {e}")))?;

    let matrix = Matrix::new_scale(RASTER_SCALE, RASTER_SCALE);
    let pixmap = page
        .to_pixmap(&matrix, &Colorspace::device_rgb(), 1.0, true)
        .map_err(|e| render_err(format!("Failed to render: {e}")))?;

    let width = pixmap.width();
    let height = pixmap.height();
    let n = pixmap.n() as usize;
    if n != 3 && n != 4 {
        return Err(render_err(format!("Unexpected pixel format with {n} components")));
    }

    let mut pixels = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
    for chunk in pixmap.samples().chunks_exact(n) {
        // Without an alpha channel nothing is transparent, so the pixel is opaque
        let alpha = if n == 4 { chunk[3] } else { 255 };
        pixels.extend_from_slice(&[chunk[2], chunk[1], chunk[0], alpha]);
    }

    if pixels.len() != width as usize * height as usize * BYTES_PER_PIXEL {
        return Err(render_err(format!(
            "Pixmap holds {} bytes, expected {}x{} pixels",
            pixels.len(),
            width,
            height
        )));
    }

    tracing::debug!("Rasterized page {} at {}x{} px", page_num, width, height);

    Ok(RasterFrame {
        width,
        height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_stride() {
        let frame = RasterFrame {
            width: 3,
            height: 2,
            pixels: vec![0; 24],
        };
        assert_eq!(frame.row_stride(), 12);
    }

    #[test]
    fn test_to_png_rejects_short_buffer() {
        let frame = RasterFrame {
            width: 3,
            height: 2,
            pixels: vec![0; 8],
        };
        assert!(frame.to_png().is_err());
    }

    #[test]
    fn test_to_png_magic() {
        let frame = RasterFrame {
            width: 2,
            height: 2,
            pixels: vec![0, 0, 255, 255].repeat(4),
        };
        let png = frame.to_png().unwrap_or_default();
        assert!(png.starts_with(&[0x89, 0x50, 0x4E, 0x47]));
    }
}
