//! Detection value types.

use serde::{Deserialize, Serialize};

use crate::geometry::PixelRect;

/// One detected object in full-frame pixel coordinates.
///
/// Immutable value: created by the coordinate mapper (or the full-frame
/// path), filtered by NMS into a new reduced set, never mutated in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding box in full-frame pixel space, top-left origin.
    pub bounds: PixelRect,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    /// Class label, when the detector reports one.
    pub label: Option<String>,
}

impl Detection {
    pub fn new(bounds: PixelRect, confidence: f32, label: Option<String>) -> Self {
        Self {
            bounds,
            confidence,
            label,
        }
    }
}
