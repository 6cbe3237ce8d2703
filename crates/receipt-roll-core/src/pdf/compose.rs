//! Building single-page output documents out of source pages.
//!
//! # Strategy
//!
//! Both the combiner and the trimmer produce a document with exactly one page
//! whose content is one or more source pages drawn like images. Each source
//! page is lifted into a Form XObject (its content streams plus its inherited
//! resources, clipped to its MediaBox) inside the *same* lopdf document, so
//! fonts and images are shared rather than copied. A new page is then built
//! that invokes those forms, the catalog is replaced so the old page tree
//! becomes unreachable, and unreachable objects are pruned before saving.
//!
//! # Coordinate System
//!
//! Placements are given in PDF space (bottom-left origin, y upward). Callers
//! that think top-down, like the combiner, convert with
//! `pdf_y = page_height - top_y - height`.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::geometry::PageGeometry;
use super::document::{SourceDocument, inherited_attribute};
use super::page_index::PageIndex;

/// A source page wrapped as a Form XObject.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PageForm {
    id: ObjectId,
    bbox: [f32; 4],
}

/// Where a form lands on the output page, in PDF space.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Placement {
    pub form: PageForm,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    /// `cm` operands mapping the form's BBox onto the target rectangle.
    fn matrix(&self) -> [f32; 6] {
        let [bx0, by0, bx1, by1] = self.form.bbox;
        let sx = self.width / (bx1 - bx0);
        let sy = self.height / (by1 - by0);
        [sx, 0.0, 0.0, sy, self.x - bx0 * sx, self.y - by0 * sy]
    }
}

/// Lift the first `count` pages of `source` into forms, in page order.
///
/// Consumes the source: the returned document is the one output is built in.
pub(crate) fn lift_pages(source: SourceDocument, count: usize) -> Result<(Document, Vec<PageForm>)> {
    let mut requests = Vec::with_capacity(count);
    for page_num in 0..count {
        let index = PageIndex::try_from_page_num(page_num, source.page_count())?;
        requests.push((source.page_id(index), source.media_box(page_num)?));
    }

    let mut doc = source.into_lopdf();
    let mut forms = Vec::with_capacity(requests.len());
    for (page_id, bbox) in requests {
        forms.push(page_to_form(&mut doc, page_id, bbox)?);
    }
    Ok((doc, forms))
}

fn page_to_form(doc: &mut Document, page_id: ObjectId, bbox: [f32; 4]) -> Result<PageForm> {
    // Decompressed and concatenated across every content stream of the page
    let content = doc.get_page_content(page_id)?;

    let page = doc.get_dictionary(page_id)?;
    let resources = inherited_attribute(doc, page, b"Resources")
        .cloned()
        .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));

    let form_dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "FormType" => 1,
        "BBox" => bbox.iter().map(|&v| Object::Real(v)).collect::<Vec<_>>(),
        "Resources" => resources,
    };
    let id = doc.add_object(Stream::new(form_dict, content));

    Ok(PageForm { id, bbox })
}

/// Replace the document's page tree with one page of `size` drawing `placements`.
pub(crate) fn build_single_page(
    doc: &mut Document,
    size: PageGeometry,
    placements: &[Placement],
) -> Result<()> {
    let mut content = String::new();
    let mut xobjects = Dictionary::new();

    for (i, placement) in placements.iter().enumerate() {
        let name = format!("Pg{i}");
        xobjects.set(name.as_bytes(), Object::Reference(placement.form.id));

        let [a, b, c, d, e, f] = placement.matrix();
        let _ = writeln!(content, "q\n{a} {b} {c} {d} {e} {f} cm\n/{name} Do\nQ");
    }

    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(size.width),
            Object::Real(size.height),
        ],
        "Resources" => dictionary! { "XObject" => xobjects },
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );

    // A fresh catalog drops outlines and named destinations into the old tree
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let pruned = doc.prune_objects();
    tracing::trace!("Pruned {} unreachable objects", pruned.len());
    doc.renumber_objects();
    doc.compress();

    Ok(())
}

/// Save `doc` to `output` without ever leaving a partial file there.
///
/// The document is written to a temporary file next to `output` and renamed
/// over it only once fully flushed.
pub(crate) fn write_pdf(doc: &mut Document, output: &Path) -> Result<()> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(dir)?;
    doc.save_to(&mut staged)
        .map_err(|e| Error::PdfWrite(format!("Failed to save {}: {e}", output.display())))?;
    staged.flush()?;

    staged
        .persist(output)
        .map_err(|e| Error::PdfWrite(format!("Failed to move PDF into {}: {}", output.display(), e.error)))?;

    Ok(())
}
