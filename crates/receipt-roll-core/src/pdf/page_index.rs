//! Zero-based page index shared by the lopdf and mupdf sides.
//!
//! lopdf numbers pages from 1 with `u32`, mupdf from 0 with `i32`; the
//! combiner and trimmer only ever speak `usize`.

use std::fmt;

use crate::error::Error;

/// A validated, zero-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(i32);

impl PageIndex {
    /// Validate `page_num` against the document's page count.
    pub fn try_from_page_num(page_num: usize, total_pages: usize) -> Result<Self, Error> {
        if page_num >= total_pages {
            return Err(Error::InvalidPage {
                page: page_num,
                total: total_pages,
            });
        }

        i32::try_from(page_num)
            .map(Self)
            .map_err(|_| Error::InvalidPage {
                page: page_num,
                total: total_pages,
            })
    }

    #[must_use]
    #[allow(clippy::cast_sign_loss)] // never negative, see constructors
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

}

impl From<PageIndex> for i32 {
    fn from(index: PageIndex) -> Self {
        index.0
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_page_num_valid() {
        let idx = PageIndex::try_from_page_num(2, 3).unwrap();
        assert_eq!(i32::from(idx), 2);
        assert_eq!(idx.as_usize(), 2);
    }

    #[test]
    fn test_try_from_page_num_out_of_range() {
        let result = PageIndex::try_from_page_num(3, 3);
        assert!(matches!(result, Err(Error::InvalidPage { page: 3, total: 3 })));
    }

    #[test]
    fn test_display() {
        assert_eq!(PageIndex::try_from_page_num(7, 8).unwrap().to_string(), "7");
    }
}
