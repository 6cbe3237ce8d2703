mod compose;
mod document;
mod page_index;
pub mod combine;
pub mod raster;
pub mod trim;

pub use combine::combine;
pub use document::SourceDocument;
pub use page_index::PageIndex;
pub use raster::{BYTES_PER_PIXEL, RASTER_SCALE, RasterFrame, rasterize_page};
pub use trim::{BlankProbe, probe, trim};
