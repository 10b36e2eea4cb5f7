//! Axis-aligned rectangle geometry in full-frame pixel space.
//!
//! All detection boxes downstream of the coordinate mapper live in this
//! space: origin at the top-left of the frame, x right, y down, units of
//! pixels. Rectangles are stored as origin + size rather than corner pairs
//! because the tiling and mapping math works in offsets and extents.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle: top-left origin plus size, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// True when the rectangle encloses no area.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Translate by `(dx, dy)`.
    pub fn offset_by(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Intersection with `other`. The result may be degenerate.
    pub fn intersection(&self, other: &PixelRect) -> PixelRect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());
        PixelRect {
            x,
            y,
            width: max_x - x,
            height: max_y - y,
        }
    }
}

/// Intersection-over-union of two rectangles.
///
/// Defined as 0 when the rectangles do not overlap or when the union has no
/// area, so degenerate inputs never produce NaN.
pub fn iou(a: &PixelRect, b: &PixelRect) -> f32 {
    let inter = a.intersection(b);
    if inter.is_degenerate() {
        return 0.0;
    }
    let inter_area = inter.area();
    let union = a.area() + b.area() - inter_area;
    if union > f32::EPSILON {
        inter_area / union
    } else {
        0.0
    }
}

/// Normalized rectangle as produced by an inference adapter.
///
/// Coordinates are fractions of the region that was submitted for
/// inference, with the origin conventionally at the *bottom-left* (the
/// adapter contract). The coordinate mapper flips this into top-left pixel
/// space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormRect {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl NormRect {
    pub fn new(min_x: f32, min_y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Corner-pair constructor, matching detector outputs that report
    /// `[min_x, min_y, max_x, max_y]`.
    pub fn from_corners(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    pub fn max_y(&self) -> f32 {
        self.min_y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iou_of_identical_rects_is_one() {
        let a = PixelRect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(iou(&a, &a), 1.0);
    }

    #[test]
    fn iou_is_symmetric() {
        let a = PixelRect::new(0.0, 0.0, 100.0, 100.0);
        let b = PixelRect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(iou(&a, &b), iou(&b, &a));
    }

    #[test]
    fn iou_of_disjoint_rects_is_zero() {
        let a = PixelRect::new(0.0, 0.0, 10.0, 10.0);
        let b = PixelRect::new(20.0, 20.0, 10.0, 10.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn iou_of_touching_rects_is_zero() {
        // Shared edge, no interior overlap.
        let a = PixelRect::new(0.0, 0.0, 10.0, 10.0);
        let b = PixelRect::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn iou_quarter_overlap() {
        let a = PixelRect::new(0.0, 0.0, 2.0, 2.0);
        let b = PixelRect::new(1.0, 1.0, 2.0, 2.0);
        // Intersection 1, union 7.
        assert!((iou(&a, &b) - 1.0 / 7.0).abs() < 1e-6);
    }

    #[test]
    fn iou_of_degenerate_rect_is_zero() {
        let a = PixelRect::new(0.0, 0.0, 0.0, 10.0);
        assert_eq!(iou(&a, &a), 0.0);
    }

    #[test]
    fn intersection_clips_to_overlap() {
        let a = PixelRect::new(0.0, 0.0, 100.0, 100.0);
        let b = PixelRect::new(60.0, 70.0, 100.0, 100.0);
        let inter = a.intersection(&b);
        assert_eq!(inter, PixelRect::new(60.0, 70.0, 40.0, 30.0));
    }

    #[test]
    fn norm_rect_from_corners() {
        let r = NormRect::from_corners(0.1, 0.1, 0.3, 0.3);
        assert!((r.width - 0.2).abs() < 1e-6);
        assert!((r.max_y() - 0.3).abs() < 1e-6);
    }
}
