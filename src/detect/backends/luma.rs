//! Brightness-blob adapter: a cheap CPU stand-in for a real detector.
//!
//! Finds the bounding box of pixels brighter than a threshold in the
//! region. One detection at most, confidence proportional to how much of
//! that box is actually bright. Good enough to exercise the whole tiling
//! pipeline end to end without a model; not a detector anyone should ship.

use anyhow::Result;

use crate::detect::adapter::{InferenceAdapter, RawDetection};
use crate::frame::{FrameImage, PlanarFrame};
use crate::geometry::NormRect;

/// Default luma cutoff, tuned for the demo's synthetic frames.
pub const DEFAULT_LUMA_THRESHOLD: u8 = 200;

pub struct LumaBlobAdapter {
    threshold: u8,
    label: Option<String>,
}

impl LumaBlobAdapter {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold,
            label: Some("blob".to_string()),
        }
    }
}

impl Default for LumaBlobAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_LUMA_THRESHOLD)
    }
}

fn luma(rgb: [u8; 3]) -> u8 {
    // Integer Rec.601 luma approximation.
    ((rgb[0] as u32 * 77 + rgb[1] as u32 * 150 + rgb[2] as u32 * 29) >> 8) as u8
}

impl InferenceAdapter<PlanarFrame> for LumaBlobAdapter {
    fn name(&self) -> &'static str {
        "luma-blob"
    }

    fn detect(&mut self, region: &PlanarFrame) -> Result<Vec<RawDetection>> {
        let (width, height) = (region.width(), region.height());
        if width == 0 || height == 0 {
            return Ok(vec![]);
        }

        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut bright = 0u64;

        for y in 0..height {
            for x in 0..width {
                if luma(region.pixel(x, y)) >= self.threshold {
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                    bright += 1;
                }
            }
        }

        if bright == 0 {
            return Ok(vec![]);
        }

        let box_w = (max_x - min_x + 1) as f32;
        let box_h = (max_y - min_y + 1) as f32;
        let confidence = (bright as f32 / (box_w * box_h)).clamp(0.0, 1.0);

        // Report in the adapter convention: normalized, bottom-left origin.
        let bounds = NormRect::new(
            min_x as f32 / width as f32,
            1.0 - (max_y + 1) as f32 / height as f32,
            box_w / width as f32,
            box_h / height as f32,
        );

        Ok(vec![RawDetection::new(
            bounds,
            confidence,
            self.label.clone(),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_region_yields_nothing() {
        let frame = PlanarFrame::blank(16, 16);
        let mut adapter = LumaBlobAdapter::default();
        assert!(adapter.detect(&frame).unwrap().is_empty());
    }

    #[test]
    fn bright_square_is_boxed_in_adapter_convention() {
        let mut frame = PlanarFrame::blank(10, 10);
        // 2x2 bright square with top-left at (4, 6).
        for y in 6..8 {
            for x in 4..6 {
                frame.set_pixel(x, y, [255, 255, 255]);
            }
        }

        let mut adapter = LumaBlobAdapter::default();
        let dets = adapter.detect(&frame).unwrap();
        assert_eq!(dets.len(), 1);

        let b = dets[0].bounds;
        assert!((b.min_x - 0.4).abs() < 1e-6);
        // Bottom-left origin: rows 6..8 from the top are min_y = 1 - 8/10.
        assert!((b.min_y - 0.2).abs() < 1e-6);
        assert!((b.width - 0.2).abs() < 1e-6);
        assert!((b.height - 0.2).abs() < 1e-6);
        assert_eq!(dets[0].confidence, 1.0);
    }
}
