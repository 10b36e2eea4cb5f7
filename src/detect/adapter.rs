//! Inference adapter contract.
//!
//! The detector itself (model loading, tensor plumbing, platform ML APIs)
//! lives outside this crate. The core depends only on this trait: hand an
//! adapter one image region, get back zero or more raw detections. Both
//! common detector result shapes (with and without class labels) normalize
//! into [`RawDetection`], so no downcasting survives into the pipeline.

use anyhow::Result;

use crate::geometry::NormRect;

/// Raw detection as reported by an adapter for one region.
///
/// `bounds` is normalized to the submitted region, origin at the
/// bottom-left (the platform-vision convention). The coordinate mapper owns
/// the flip into top-left pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct RawDetection {
    pub bounds: NormRect,
    pub confidence: f32,
    pub label: Option<String>,
}

impl RawDetection {
    pub fn new(bounds: NormRect, confidence: f32, label: Option<String>) -> Self {
        Self {
            bounds,
            confidence,
            label,
        }
    }
}

/// External inference collaborator.
///
/// One call per region, synchronous. A failed call is an adapter-local
/// event: the pipeline logs it and treats the region as empty, it never
/// aborts the frame. Implementations needing bounded latency must impose
/// their own timeout; none is defined at this layer.
pub trait InferenceAdapter<I> {
    /// Adapter identifier, used in log lines.
    fn name(&self) -> &'static str;

    /// Run detection on one image region.
    fn detect(&mut self, region: &I) -> Result<Vec<RawDetection>>;
}
