//! Blank-row detection on raw pixel buffers.
//!
//! A row is blank when every byte in it is zero. Receipts grow top to bottom,
//! so trailing whitespace is always a contiguous run of rows at the end of the
//! buffer; both functions walk backwards one stride at a time and stop at the
//! first row holding any non-zero byte.
//!
//! Rows are cut from the *end* of the buffer, so the first row examined starts
//! at `buffer.len() - row_stride`. Bytes that do not fill a whole row are left
//! over at the front and ignored.

fn is_blank(row: &[u8]) -> bool {
    row.iter().all(|&b| b == 0)
}

/// Number of complete rows in `buffer`.
pub fn row_count(buffer: &[u8], row_stride: usize) -> usize {
    buffer.len().checked_div(row_stride).unwrap_or(0)
}

/// Index (0 = top) of the lowest row that contains a non-zero byte.
///
/// Returns `None` when every row is blank, or when `row_stride` is zero.
pub fn first_non_blank_row_from_bottom(buffer: &[u8], row_stride: usize) -> Option<usize> {
    if row_stride == 0 {
        return None;
    }

    let rows = row_count(buffer, row_stride);
    buffer
        .rchunks_exact(row_stride)
        .position(|row| !is_blank(row))
        .map(|from_bottom| rows - 1 - from_bottom)
}

/// Number of consecutive blank rows at the bottom of `buffer`.
pub fn trailing_blank_rows(buffer: &[u8], row_stride: usize) -> usize {
    if row_stride == 0 {
        return 0;
    }

    buffer
        .rchunks_exact(row_stride)
        .take_while(|row| is_blank(row))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRIDE: usize = 4 * 3; // three BGRA pixels

    fn frame(rows: &[bool]) -> Vec<u8> {
        rows.iter()
            .flat_map(|&inked| {
                let mut row = vec![0u8; STRIDE];
                if inked {
                    row[0] = 0xff;
                }
                row
            })
            .collect()
    }

    #[test]
    fn test_counts_trailing_blank_rows() {
        let buffer = frame(&[true, false, true, false, false, false]);
        assert_eq!(trailing_blank_rows(&buffer, STRIDE), 3);
        assert_eq!(first_non_blank_row_from_bottom(&buffer, STRIDE), Some(2));
    }

    #[test]
    fn test_no_blank_rows() {
        let buffer = frame(&[false, true]);
        assert_eq!(trailing_blank_rows(&buffer, STRIDE), 0);
        assert_eq!(first_non_blank_row_from_bottom(&buffer, STRIDE), Some(1));
    }

    #[test]
    fn test_fully_blank_buffer() {
        let buffer = frame(&[false; 5]);
        assert_eq!(trailing_blank_rows(&buffer, STRIDE), 5);
        assert_eq!(first_non_blank_row_from_bottom(&buffer, STRIDE), None);
    }

    #[test]
    fn test_single_byte_marks_row_non_blank() {
        let mut buffer = frame(&[false; 4]);
        // Last byte of row 1: the alpha channel of its rightmost pixel
        buffer[2 * STRIDE - 1] = 1;
        assert_eq!(trailing_blank_rows(&buffer, STRIDE), 2);
        assert_eq!(first_non_blank_row_from_bottom(&buffer, STRIDE), Some(1));
    }

    #[test]
    fn test_stops_at_first_inked_row() {
        // Blank rows above the ink must not be counted
        let buffer = frame(&[false, false, true, false]);
        assert_eq!(trailing_blank_rows(&buffer, STRIDE), 1);
    }

    #[test]
    fn test_partial_leading_bytes_ignored() {
        let mut buffer = vec![0xff; 5];
        buffer.extend(frame(&[false, false]));
        assert_eq!(row_count(&buffer, STRIDE), 2);
        assert_eq!(trailing_blank_rows(&buffer, STRIDE), 2);
        assert_eq!(first_non_blank_row_from_bottom(&buffer, STRIDE), None);
    }

    #[test]
    fn test_zero_stride() {
        assert_eq!(trailing_blank_rows(&[0, 0], 0), 0);
        assert_eq!(first_non_blank_row_from_bottom(&[1, 1], 0), None);
        assert_eq!(row_count(&[1, 1], 0), 0);
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(trailing_blank_rows(&[], STRIDE), 0);
        assert_eq!(first_non_blank_row_from_bottom(&[], STRIDE), None);
    }
}
