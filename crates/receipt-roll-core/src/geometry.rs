//! Page geometry value types.
//!
//! All sizes are PDF points (1/72 inch). The rasterizer runs at one pixel per
//! point, so a pixel row count can be applied to a point height directly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Two page sizes closer than this are considered equal.
const GEOMETRY_TOLERANCE: f32 = 0.01;

/// Width and height of a page, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
}

impl PageGeometry {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Create from a PDF rectangle `[x0, y0, x1, y1]`
    pub fn from_media_box(media_box: [f32; 4]) -> Self {
        Self {
            width: (media_box[2] - media_box[0]).abs(),
            height: (media_box[3] - media_box[1]).abs(),
        }
    }

    /// Geometry of `count` pages of this size stacked vertically.
    #[allow(clippy::cast_precision_loss)]
    pub fn stacked(self, count: usize) -> Self {
        Self {
            width: self.width,
            height: self.height * count as f32,
        }
    }

    /// Whether both dimensions match within a hundredth of a point.
    pub fn approx_eq(self, other: Self) -> bool {
        (self.width - other.width).abs() < GEOMETRY_TOLERANCE
            && (self.height - other.height).abs() < GEOMETRY_TOLERANCE
    }
}

impl fmt::Display for PageGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}pt", self.width, self.height)
    }
}

/// Size of the page emitted by the trimmer.
///
/// Returned so callers know the physical receipt length without reopening
/// the output file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultBox {
    pub width: f32,
    pub height: f32,
}

impl ResultBox {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for ResultBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}pt", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_media_box_with_offset_origin() {
        let geometry = PageGeometry::from_media_box([10.0, 20.0, 110.0, 70.0]);
        assert_eq!(geometry, PageGeometry::new(100.0, 50.0));
    }

    #[test]
    fn test_stacked_sums_height_keeps_width() {
        let stacked = PageGeometry::new(100.0, 50.0).stacked(3);
        assert_eq!(stacked, PageGeometry::new(100.0, 150.0));
    }

    #[test]
    fn test_approx_eq() {
        let a = PageGeometry::new(136.06, 2834.65);
        assert!(a.approx_eq(PageGeometry::new(136.061, 2834.649)));
        assert!(!a.approx_eq(PageGeometry::new(136.06, 2800.0)));
    }

    #[test]
    fn test_result_box_serializes_as_pair() {
        let json = serde_json::to_string(&ResultBox::new(50.0, 0.0)).unwrap_or_default();
        assert_eq!(json, r#"{"width":50.0,"height":0.0}"#);
    }
}
