use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};
use crate::geometry::PageGeometry;
use super::page_index::PageIndex;

/// US Letter, used when a page tree carries no MediaBox at all.
const FALLBACK_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// A read-only source PDF.
///
/// Holds both the raw bytes (handed to the rasterizer) and the parsed lopdf
/// document (used to read geometry and to lift pages into form XObjects).
/// Dropping it releases everything; nothing is written back to disk.
pub struct SourceDocument {
    bytes: Vec<u8>,
    doc: Document,
    /// Page object ids in page order
    page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Parse a PDF from bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();

        let doc = Document::load_mem(&bytes)
            .map_err(|e| Error::DocumentOpen(format!("Failed to parse PDF: {e}")))?;

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        if page_ids.is_empty() {
            return Err(Error::DocumentOpen("PDF contains no pages".to_string()));
        }

        Ok(Self {
            bytes,
            doc,
            page_ids,
        })
    }

    /// Open a PDF from a file path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            Error::DocumentOpen(format!("Failed to read file {}: {}", path.display(), e))
        })?;
        Self::from_bytes(bytes)
    }

    /// Get number of pages
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Raw PDF bytes as read from disk
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the parsed document to build output from, dropping the raw bytes.
    pub(crate) fn into_lopdf(self) -> Document {
        self.doc
    }

    pub(crate) fn page_id(&self, index: PageIndex) -> ObjectId {
        self.page_ids[index.as_usize()]
    }

    /// MediaBox of a page, following the page tree for inherited values.
    pub fn media_box(&self, page_num: usize) -> Result<[f32; 4]> {
        let index = PageIndex::try_from_page_num(page_num, self.page_count())?;
        let page = self.doc.get_dictionary(self.page_id(index))?;
        Ok(inherited_media_box(&self.doc, page).unwrap_or(FALLBACK_MEDIA_BOX))
    }

    /// Size of a page in points
    pub fn page_geometry(&self, page_num: usize) -> Result<PageGeometry> {
        self.media_box(page_num).map(PageGeometry::from_media_box)
    }

    /// Page 0 is authoritative for width and height of every operation.
    pub fn first_page_geometry(&self) -> Result<PageGeometry> {
        self.page_geometry(0)
    }

    /// Fail unless every page has the geometry of page 0.
    pub fn ensure_uniform_pages(&self) -> Result<PageGeometry> {
        let expected = self.first_page_geometry()?;
        for page in 1..self.page_count() {
            let found = self.page_geometry(page)?;
            if !found.approx_eq(expected) {
                return Err(Error::NonUniformPages {
                    page,
                    expected,
                    found,
                });
            }
        }
        Ok(expected)
    }
}

impl std::fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDocument")
            .field("page_count", &self.page_ids.len())
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Look up a page attribute on the page or, failing that, its ancestors.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    node: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    if let Ok(value) = node.get(key) {
        return Some(value);
    }

    let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
    let parent = doc.get_dictionary(parent_id).ok()?;
    inherited_attribute(doc, parent, key)
}

fn inherited_media_box(doc: &Document, page: &Dictionary) -> Option<[f32; 4]> {
    let object = inherited_attribute(doc, page, b"MediaBox")?;
    let array = match object {
        Object::Reference(id) => doc.get_object(*id).and_then(Object::as_array).ok()?,
        other => other.as_array().ok()?,
    };

    let values: Vec<f32> = array.iter().filter_map(|o| o.as_float().ok()).collect();
    match values.as_slice() {
        &[x0, y0, x1, y1] => Some([x0, y0, x1, y1]),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    fn inherited_box_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 136.into(), 400.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_media_box_inherited_from_page_tree() {
        let source = SourceDocument::from_bytes(inherited_box_pdf()).unwrap();
        assert_eq!(source.page_count(), 1);
        assert_eq!(
            source.first_page_geometry().unwrap(),
            PageGeometry::new(136.0, 400.0)
        );
    }

    #[test]
    fn test_garbage_bytes_fail_to_open() {
        let result = SourceDocument::from_bytes(b"not a pdf".to_vec());
        assert!(matches!(result, Err(Error::DocumentOpen(_))));
    }

    #[test]
    fn test_missing_file_fails_to_open() {
        let result = SourceDocument::open("/nonexistent/receipt.pdf");
        assert!(matches!(result, Err(Error::DocumentOpen(_))));
    }

    #[test]
    fn test_page_out_of_range() {
        let source = SourceDocument::from_bytes(inherited_box_pdf()).unwrap();
        assert!(matches!(
            source.page_geometry(1),
            Err(Error::InvalidPage { page: 1, total: 1 })
        ));
    }
}
