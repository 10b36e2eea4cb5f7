//! Adaptive tile budget: caps tiles per frame by coarsening the tiling.
//!
//! Video frames pay per tile, so a tiling that explodes past the budget is
//! recomputed with larger tiles instead of being truncated. This is a
//! single-pass correction: the scale factor is derived once from the
//! overshoot ratio and the result is used even if it still exceeds the
//! budget (best-effort cap, not a hard guarantee).

use anyhow::{anyhow, Result};

use crate::frame::FrameExtent;
use crate::tile::{tile_rects, TilingConfig};

/// Overlap used for a budget-corrected tiling. Deliberately smaller than
/// typical caller overlaps: coarser tiles already cover more context, and
/// the correction trades recall for speed.
pub const BUDGET_OVERLAP: f32 = 0.1;

/// Cap the tiling at `max_tiles` tiles for `extent`.
///
/// When the candidate tiling fits the budget it is returned unchanged.
/// Otherwise each tile dimension is scaled by
/// `ceil(sqrt(tile_count / max_tiles))`, clamped to the frame extent per
/// axis, and the overlap is reset to [`BUDGET_OVERLAP`].
pub fn cap_tiles(
    extent: FrameExtent,
    config: &TilingConfig,
    max_tiles: usize,
) -> Result<TilingConfig> {
    if max_tiles == 0 {
        return Err(anyhow!("max tiles per frame must be positive"));
    }

    let count = tile_rects(extent, config).len();
    if count <= max_tiles {
        return Ok(*config);
    }

    let scale = (count as f64 / max_tiles as f64).sqrt().ceil() as u32;
    let width = config
        .tile_width()
        .saturating_mul(scale)
        .min(extent.width.max(1));
    let height = config
        .tile_height()
        .saturating_mul(scale)
        .min(extent.height.max(1));

    log::debug!(
        "tile budget exceeded: {} > {}, rescaling {}x{} -> {}x{} (scale {})",
        count,
        max_tiles,
        config.tile_width(),
        config.tile_height(),
        width,
        height,
        scale
    );

    TilingConfig::new(width, height, BUDGET_OVERLAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_budget_is_untouched() {
        let cfg = TilingConfig::new(640, 640, 0.2).unwrap();
        let capped = cap_tiles(FrameExtent::new(1280, 720), &cfg, 16).unwrap();
        assert_eq!(capped, cfg);
    }

    #[test]
    fn overshoot_scales_by_ceil_sqrt_ratio() {
        // 8x8 grid of 100px tiles, zero overlap: 64 tiles, budget 16,
        // scale = ceil(sqrt(4)) = 2.
        let cfg = TilingConfig::new(100, 100, 0.0).unwrap();
        let extent = FrameExtent::new(800, 800);
        assert_eq!(tile_rects(extent, &cfg).len(), 64);

        let capped = cap_tiles(extent, &cfg, 16).unwrap();
        assert_eq!(capped.tile_width(), 200);
        assert_eq!(capped.tile_height(), 200);
        assert_eq!(capped.overlap(), BUDGET_OVERLAP);
        // The reset overlap re-adds some tiles (step 180 on 800px gives a
        // 5x5 grid); the correction stays single-pass regardless.
        assert_eq!(tile_rects(extent, &capped).len(), 25);
    }

    #[test]
    fn scaled_tiles_clamp_to_frame_extent() {
        let cfg = TilingConfig::new(100, 100, 0.0).unwrap();
        let extent = FrameExtent::new(1000, 150);
        let capped = cap_tiles(extent, &cfg, 2).unwrap();
        assert!(capped.tile_width() <= 1000);
        assert_eq!(capped.tile_height(), 150);
    }

    #[test]
    fn correction_is_single_pass_best_effort() {
        // Extreme overshoot against a tiny budget: result may still exceed
        // the budget but must not iterate or fail.
        let cfg = TilingConfig::new(10, 10, 0.0).unwrap();
        let extent = FrameExtent::new(1000, 1000);
        let capped = cap_tiles(extent, &cfg, 1).unwrap();
        assert_eq!(capped.tile_width(), 1000);
        assert_eq!(capped.tile_height(), 1000);
        assert_eq!(tile_rects(extent, &capped).len(), 1);
    }

    #[test]
    fn zero_budget_is_rejected() {
        let cfg = TilingConfig::new(100, 100, 0.0).unwrap();
        assert!(cap_tiles(FrameExtent::new(800, 800), &cfg, 0).is_err());
    }
}
