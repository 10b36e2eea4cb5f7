//! Region-aware tiling profiles.
//!
//! One frame, two independent tiling profiles: objects far from the camera
//! sit in the upper half of a typical road/field view and project small, so
//! the top region gets finer tiles and a lower score threshold; near
//! objects in the bottom half get coarser tiles for speed. The split is a
//! fixed horizontal line at `floor(height / 2)`.

use crate::frame::FrameExtent;
use crate::tile::{TileRect, TilingConfig};

/// Tiling and score threshold for one spatial region.
#[derive(Clone, Copy, Debug)]
pub struct RegionSettings {
    pub tiling: TilingConfig,
    pub score_threshold: f32,
}

/// A frame region bound to its settings.
#[derive(Clone, Copy, Debug)]
pub struct RegionProfile {
    /// Region rectangle in full-frame coordinates.
    pub region: TileRect,
    pub tiling: TilingConfig,
    pub score_threshold: f32,
}

/// Split `extent` into top and bottom halves bound to their settings.
///
/// The top region spans rows `[0, floor(height / 2))`, the bottom the
/// remainder. Zero-height regions (frames shorter than two rows) are
/// dropped silently, so the result holds one or two profiles.
pub fn split_profiles(
    extent: FrameExtent,
    top: RegionSettings,
    bottom: RegionSettings,
) -> Vec<RegionProfile> {
    let split = extent.height / 2;
    let mut profiles = Vec::with_capacity(2);

    if split > 0 {
        profiles.push(RegionProfile {
            region: TileRect {
                x: 0,
                y: 0,
                width: extent.width,
                height: split,
            },
            tiling: top.tiling,
            score_threshold: top.score_threshold,
        });
    }
    if extent.height - split > 0 {
        profiles.push(RegionProfile {
            region: TileRect {
                x: 0,
                y: split,
                width: extent.width,
                height: extent.height - split,
            },
            tiling: bottom.tiling,
            score_threshold: bottom.score_threshold,
        });
    }
    profiles
}
