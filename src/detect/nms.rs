//! Greedy non-maximum suppression across tile results.

use anyhow::{anyhow, Result};

use crate::detect::result::Detection;
use crate::geometry::iou;

/// Confidence floor and overlap ceiling for one suppression pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionThresholds {
    iou: f32,
    score: f32,
}

impl DetectionThresholds {
    pub fn new(iou: f32, score: f32) -> Result<Self> {
        if !iou.is_finite() || !(0.0..=1.0).contains(&iou) {
            return Err(anyhow!("iou threshold must be in [0, 1], got {}", iou));
        }
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(anyhow!("score threshold must be in [0, 1], got {}", score));
        }
        Ok(Self { iou, score })
    }

    pub fn iou(&self) -> f32 {
        self.iou
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Same IoU ceiling with a different confidence floor. Used by the
    /// region-aware merge, which suppresses once with the minimum of the
    /// per-region score floors.
    pub fn with_score(&self, score: f32) -> Self {
        Self {
            iou: self.iou,
            score: score.clamp(0.0, 1.0),
        }
    }
}

/// Filter by confidence, then greedily remove overlapping duplicates.
///
/// Detections below the score floor are dropped first. Survivors are sorted
/// by confidence descending with a *stable* sort, so equal-confidence
/// detections keep their input (generation) order; the result order is
/// deterministic for a given input order. The highest-confidence survivor
/// is kept and every remaining detection with IoU >= the threshold against
/// it is removed; repeat until none remain.
///
/// Suppression is class-agnostic: all detections compete in one
/// pool regardless of label. Returns an empty vec, never an error, when
/// nothing survives.
pub fn suppress(detections: Vec<Detection>, thresholds: &DetectionThresholds) -> Vec<Detection> {
    let mut candidates: Vec<Detection> = detections
        .into_iter()
        .filter(|d| d.confidence >= thresholds.score())
        .collect();
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut suppressed = vec![false; candidates.len()];
    for i in 0..candidates.len() {
        if suppressed[i] {
            continue;
        }
        for j in (i + 1)..candidates.len() {
            if !suppressed[j]
                && iou(&candidates[i].bounds, &candidates[j].bounds) >= thresholds.iou()
            {
                suppressed[j] = true;
            }
        }
    }

    candidates
        .into_iter()
        .zip(suppressed)
        .filter_map(|(d, dropped)| (!dropped).then_some(d))
        .collect()
}
