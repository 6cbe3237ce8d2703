//! Stacking every page of a document onto one tall page.
//!
//! Page 0 ends up at the top and the last page at the bottom: printers feed
//! the roll top first.

use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::geometry::PageGeometry;
use super::compose::{Placement, build_single_page, lift_pages, write_pdf};
use super::document::SourceDocument;

/// Combine all pages of `input` into one page written to `output`.
///
/// Every page must share page 0's size; the combined page is that width and
/// `page_count` times that height. The input file is never modified.
pub fn combine(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<PageGeometry> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let source = SourceDocument::open(input)?;
    let page = source.ensure_uniform_pages()?;
    let page_count = source.page_count();
    let combined = page.stacked(page_count);

    debug!(
        "Combining {} pages of {} from {} into {}",
        page_count,
        page,
        input.display(),
        combined
    );

    let (mut doc, forms) = lift_pages(source, page_count)?;
    #[allow(clippy::cast_precision_loss)]
    let placements: Vec<Placement> = forms
        .into_iter()
        .enumerate()
        .map(|(i, form)| Placement {
            form,
            x: 0.0,
            // Band i spans [i*H, (i+1)*H) from the top
            y: combined.height - (i + 1) as f32 * page.height,
            width: page.width,
            height: page.height,
        })
        .collect();

    build_single_page(&mut doc, combined, &placements)?;
    write_pdf(&mut doc, output)?;

    info!("Combined {} pages into {} ({})", page_count, output.display(), combined);
    Ok(combined)
}
